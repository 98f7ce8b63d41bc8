// fd-core/src/units.rs

use uom::si::f64::Volume as UomVolume;

// Canonical volume type (SI, f64). Liquid quantities are entered and displayed in millilitres.
pub type Volume = UomVolume;

#[inline]
pub fn ml(v: f64) -> Volume {
    use uom::si::volume::milliliter;
    Volume::new::<milliliter>(v)
}

#[inline]
pub fn to_ml(v: Volume) -> f64 {
    use uom::si::volume::milliliter;
    v.get::<milliliter>()
}

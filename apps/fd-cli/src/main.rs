mod error;

use clap::{Parser, Subcommand};
use error::{CliError, CliResult};
use fd_engine::{FormulationConfig, FormulationEngine, IngredientId, Snapshot, Update};
use fd_mix::Mixture;
use fd_store::{RecipeStore, StoredRecipe};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "fludo")]
#[command(about = "Fludo - liquid mixture formulation tool", long_about = None)]
struct Cli {
    /// Directory holding the recipe library
    #[arg(long, global = true, default_value = "./fludo-library")]
    store: PathBuf,

    /// Formulation policy YAML (capacity range, ingredient limit, default names)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List saved recipes with their blends
    List,
    /// Show one recipe with per-ingredient bounds
    Show {
        /// Recipe key
        key: String,
    },
    /// Import a recipe snapshot (JSON, or YAML by .yaml/.yml extension)
    Import {
        /// Path to the snapshot file
        path: PathBuf,
    },
    /// Export a recipe snapshot (JSON, or YAML by .yaml/.yml extension)
    Export {
        /// Recipe key
        key: String,
        /// Output file path (optional, defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Resize the container, rescaling ingredients proportionally
    Resize {
        /// Recipe key
        key: String,
        /// New capacity in ml
        capacity: f64,
    },
    /// Set one ingredient's volume
    SetVolume {
        /// Recipe key
        key: String,
        /// Ingredient position as printed by `show`
        index: usize,
        /// Volume in ml
        volume: f64,
    },
    /// Toggle the fill ingredient, or clear it with `none`
    Fill {
        /// Recipe key
        key: String,
        /// Ingredient position, or `none`
        target: String,
    },
    /// Delete a recipe from the library
    Remove {
        /// Recipe key
        key: String,
    },
}

fn main() -> CliResult<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => FormulationConfig::load_yaml(path)?,
        None => FormulationConfig::default(),
    };
    let store = RecipeStore::new(cli.store.clone(), config)?;

    match cli.command {
        Commands::List => cmd_list(&store),
        Commands::Show { key } => cmd_show(&store, &key),
        Commands::Import { path } => cmd_import(&store, &path),
        Commands::Export { key, output } => cmd_export(&store, &key, output.as_deref()),
        Commands::Resize { key, capacity } => edit(&store, &key, |engine| {
            Ok(engine.resize_capacity(capacity)?)
        }),
        Commands::SetVolume { key, index, volume } => edit(&store, &key, |engine| {
            let id = ingredient_at(engine, index)?;
            Ok(engine.set_volume(id, volume)?)
        }),
        Commands::Fill { key, target } => {
            let index = parse_fill_target(&target)?;
            edit(&store, &key, |engine| {
                let id = index.map(|i| ingredient_at(engine, i)).transpose()?;
                Ok(engine.set_fill(id)?)
            })
        }
        Commands::Remove { key } => cmd_remove(&store, &key),
    }
}

fn cmd_list(store: &RecipeStore) -> CliResult<()> {
    let recipes = store.list()?;

    if recipes.is_empty() {
        println!("No recipes in {}", store.root_dir().display());
        return Ok(());
    }

    println!(
        "{:<36}  {:<24} {:>4} {:>4} {:>6} {:>8}",
        "key", "name", "PG", "VG", "nic", "ml"
    );
    for recipe in &recipes {
        print_recipe_row(recipe);
    }
    Ok(())
}

fn print_recipe_row(recipe: &StoredRecipe) {
    let snapshot = &recipe.snapshot;
    match snapshot.mixture() {
        Ok(mixture) => {
            let mixture = mixture.unwrap_or_else(Mixture::empty);
            println!(
                "{:<36}  {:<24} {:>4} {:>4} {:>6.1} {:>8.1}",
                recipe.key,
                recipe.name(),
                mixture.primary_pct.trunc(),
                mixture.secondary_pct.trunc(),
                mixture.concentration,
                snapshot.total_volume(),
            );
        }
        Err(err) => {
            tracing::warn!(key = %recipe.key, %err, "recipe has invalid ingredients");
            println!("{:<36}  {:<24} (invalid)", recipe.key, recipe.name());
            return;
        }
    }
    for def in &snapshot.ingredients {
        println!(
            "{:<36}    {:<22} {:>4} {:>4} {:>6.1} {:>8.1}",
            "",
            def.name,
            def.primary_pct.trunc(),
            def.secondary_pct.trunc(),
            def.concentration,
            def.volume,
        );
    }
}

fn cmd_show(store: &RecipeStore, key: &str) -> CliResult<()> {
    let recipe = store.get(key)?;
    let engine = FormulationEngine::from_snapshot(store.config().clone(), &recipe.snapshot)?;

    println!("{} ({})", engine.name(), recipe.key);
    println!("  Saved: {}", recipe.saved_at);
    if !engine.notes().is_empty() {
        println!("  Notes: {}", engine.notes());
    }
    print_update(&engine, &engine.update());
    Ok(())
}

fn print_update(engine: &FormulationEngine, update: &Update) {
    println!(
        "  {:>3}  {:<24} {:>4} {:>4} {:>6} {:>8} {:>8}",
        "#", "ingredient", "PG", "VG", "nic", "ml", "max"
    );
    for (index, bound) in update.bounds.iter().enumerate() {
        let Some(ingredient) = engine.ingredient(bound.id) else {
            continue;
        };
        let marker = if engine.fill() == Some(bound.id) {
            "*"
        } else {
            " "
        };
        println!(
            "  {:>3}{} {:<24} {:>4} {:>4} {:>6.1} {:>8.1} {:>8}",
            index,
            marker,
            ingredient.name(),
            ingredient.primary().trunc(),
            ingredient.secondary().trunc(),
            ingredient.concentration(),
            bound.volume,
            bound.max.to_string(),
        );
    }
    println!("  {}", update.status);
    match &update.mixture {
        Some(mixture) => {
            println!("  Blend: {}", mixture.describe());
            if mixture.unit_cost > 0.0 {
                println!("  Cost: {:.2}", mixture.total_cost());
            }
        }
        None => println!("  Blend: (empty)"),
    }
}

fn cmd_import(store: &RecipeStore, path: &Path) -> CliResult<()> {
    let content = std::fs::read_to_string(path).map_err(|source| CliError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    let snapshot: Snapshot = if is_yaml(path) {
        serde_yaml::from_str(&content)?
    } else {
        serde_json::from_str(&content)?
    };

    // Normalises names and re-derives the filler before anything is stored.
    let engine = FormulationEngine::from_snapshot(store.config().clone(), &snapshot)?;
    let key = store.insert(&engine.dump())?;
    println!("✓ Imported {} as {}", engine.name(), key);
    Ok(())
}

fn cmd_export(store: &RecipeStore, key: &str, output: Option<&Path>) -> CliResult<()> {
    let recipe = store.get(key)?;

    match output {
        Some(path) => {
            let content = if is_yaml(path) {
                serde_yaml::to_string(&recipe.snapshot)?
            } else {
                serde_json::to_string_pretty(&recipe.snapshot)?
            };
            std::fs::write(path, content).map_err(|source| CliError::FileWrite {
                path: path.to_path_buf(),
                source,
            })?;
            println!("✓ Exported {} to {}", recipe.name(), path.display());
        }
        None => println!("{}", serde_json::to_string_pretty(&recipe.snapshot)?),
    }
    Ok(())
}

fn cmd_remove(store: &RecipeStore, key: &str) -> CliResult<()> {
    let recipe = store.get(key)?;
    store.remove(key)?;
    println!("✓ Removed {} ({})", recipe.name(), key);
    Ok(())
}

/// Load a recipe, apply one engine operation and store the new state.
fn edit<F>(store: &RecipeStore, key: &str, op: F) -> CliResult<()>
where
    F: FnOnce(&mut FormulationEngine) -> CliResult<Update>,
{
    let recipe = store.get(key)?;
    let mut engine = FormulationEngine::from_snapshot(store.config().clone(), &recipe.snapshot)?;

    let update = op(&mut engine)?;
    store.put(key, &engine.dump())?;

    println!("✓ Updated {}", engine.name());
    print_update(&engine, &update);
    Ok(())
}

fn ingredient_at(engine: &FormulationEngine, index: usize) -> CliResult<IngredientId> {
    engine.id_at(index).ok_or_else(|| {
        CliError::InvalidInput(format!(
            "no ingredient at position {index} ({} ingredients)",
            engine.len()
        ))
    })
}

fn parse_fill_target(target: &str) -> CliResult<Option<usize>> {
    if target.eq_ignore_ascii_case("none") {
        return Ok(None);
    }
    target
        .parse::<usize>()
        .map(Some)
        .map_err(|_| CliError::InvalidInput(format!("expected a position or `none`, got {target:?}")))
}

fn is_yaml(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("yaml" | "yml")
    )
}

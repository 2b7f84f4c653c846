use anyhow::Result;
use std::io::Write;

use super::output::write_stdout;
use crate::cli::Commands;
use crate::registry::CategoryRegistry;

/// Answer a query subcommand as pretty JSON, the same shape the matching tool
/// returns.
///
/// Serialized from the typed result so struct field order is kept.
pub fn run_query(registry: &CategoryRegistry, command: &Commands) -> Result<String> {
    let json = match command {
        Commands::Check { category } => serde_json::to_string_pretty(&registry.check(category))?,
        Commands::Valid { category } => serde_json::to_string_pretty(&registry.is_valid(category))?,
        Commands::Subcategories { prefix } => {
            serde_json::to_string_pretty(&registry.subcategories(prefix))?
        }
    };
    Ok(json)
}

/// Run a query subcommand and print the result to stdout
pub fn handle_query(registry: &CategoryRegistry, command: &Commands) -> Result<()> {
    let json = run_query(registry, command)?;
    write_stdout(|out| writeln!(out, "{json}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn query(registry: &CategoryRegistry, command: Commands) -> Value {
        serde_json::from_str(&run_query(registry, &command).unwrap()).unwrap()
    }

    #[test]
    fn test_queries() {
        let registry: CategoryRegistry = ["Gem/Cuisson/Divers", "Gem/Froid/Divers"]
            .into_iter()
            .collect();

        let check = query(
            &registry,
            Commands::Check {
                category: "Gem/Froid".to_string(),
            },
        );
        assert_eq!(
            check,
            json!({
                "exists": false,
                "category": "Gem/Froid",
                "message": "Category 'Gem/Froid' does not exist in the list."
            })
        );

        let valid = query(
            &registry,
            Commands::Valid {
                category: "Gem/Froid/Divers".to_string(),
            },
        );
        assert_eq!(valid, json!(true));

        let listed = query(
            &registry,
            Commands::Subcategories {
                prefix: "Gem/".to_string(),
            },
        );
        assert_eq!(listed, json!(["Gem/Cuisson/Divers", "Gem/Froid/Divers"]));
    }

    #[test]
    fn test_check_keeps_field_order() {
        let registry: CategoryRegistry = ["Gem/Froid/Divers"].into_iter().collect();
        let printed = run_query(
            &registry,
            &Commands::Check {
                category: "Gem/Froid/Divers".to_string(),
            },
        )
        .unwrap();

        let keys: Vec<usize> = ["\"exists\"", "\"category\"", "\"message\""]
            .iter()
            .map(|key| printed.find(key).expect("key present"))
            .collect();
        assert!(keys.windows(2).all(|w| w[0] < w[1]), "{printed}");
    }
}

//! Pure functions for calculating deployment plans (Functional Core).

use super::config::TableConfig;

/// Represents the current state of a table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableState {
    pub status: TableStatus,
    /// Name of the HASH key attribute, when the table reports one.
    pub partition_key: Option<String>,
}

/// Table status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableStatus {
    Active,
    Creating,
    Updating,
    Deleting,
}

/// Planned changes for deployment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeployPlan {
    /// Table doesn't exist, needs to be created.
    CreateTable { config: TableConfig },
    /// Table exists with a different key. Key schemas cannot be altered in
    /// place, so this is reported and not applied.
    KeyMismatch {
        table_name: String,
        expected: String,
        actual: String,
    },
    /// Table is up to date, no changes needed.
    NoChanges { table_name: String },
}

/// Plan for destroying a table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DestroyPlan {
    /// Table exists and will be deleted.
    DeleteTable { table_name: String },
    /// Table doesn't exist, nothing to do.
    AlreadyGone { table_name: String },
}

/// Pure function: Calculate what changes are needed to reach desired state.
pub fn calculate_deploy_plan(current: Option<&TableState>, desired: &TableConfig) -> DeployPlan {
    let Some(state) = current else {
        return DeployPlan::CreateTable {
            config: desired.clone(),
        };
    };

    match &state.partition_key {
        Some(actual) if *actual != desired.partition_key.name => DeployPlan::KeyMismatch {
            table_name: desired.table_name.clone(),
            expected: desired.partition_key.name.clone(),
            actual: actual.clone(),
        },
        _ => DeployPlan::NoChanges {
            table_name: desired.table_name.clone(),
        },
    }
}

/// Pure function: Calculate destroy plan.
pub fn calculate_destroy_plan(current: Option<&TableState>, table_name: &str) -> DestroyPlan {
    match current {
        Some(_) => DestroyPlan::DeleteTable {
            table_name: table_name.to_string(),
        },
        None => DestroyPlan::AlreadyGone {
            table_name: table_name.to_string(),
        },
    }
}

/// Pure function: Format a deploy plan for display.
pub fn format_deploy_plan(plan: &DeployPlan) -> Vec<String> {
    match plan {
        DeployPlan::CreateTable { config } => vec![
            format!("+ Create table: {}", config.table_name),
            format!(
                "  Partition key: {} ({})",
                config.partition_key.name,
                config.partition_key.attribute_type.code()
            ),
            "  Billing: PAY_PER_REQUEST".to_string(),
        ],
        DeployPlan::KeyMismatch {
            table_name,
            expected,
            actual,
        } => vec![
            format!("~ Table '{}' is keyed by '{}'", table_name, actual),
            format!("  Expected partition key '{}'; recreate with --destroy", expected),
        ],
        DeployPlan::NoChanges { table_name } => {
            vec![format!("= Table '{}' is up to date", table_name)]
        }
    }
}

/// Pure function: Format a destroy plan for display.
pub fn format_destroy_plan(plan: &DestroyPlan) -> Vec<String> {
    match plan {
        DestroyPlan::DeleteTable { table_name } => {
            vec![format!(
                "- Delete table: {} (ALL DATA WILL BE LOST)",
                table_name
            )]
        }
        DestroyPlan::AlreadyGone { table_name } => {
            vec![format!("= Table '{}' does not exist", table_name)]
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dynamodb::config::libros_table_config;

    fn active(partition_key: Option<&str>) -> TableState {
        TableState {
            status: TableStatus::Active,
            partition_key: partition_key.map(str::to_string),
        }
    }

    #[test]
    fn test_missing_table_is_created() {
        let config = libros_table_config();
        let plan = calculate_deploy_plan(None, &config);

        assert_eq!(plan, DeployPlan::CreateTable { config });
    }

    #[test]
    fn test_existing_table_needs_no_changes() {
        let plan = calculate_deploy_plan(Some(&active(Some("id"))), &libros_table_config());

        assert_eq!(
            plan,
            DeployPlan::NoChanges {
                table_name: "Libros".to_string()
            }
        );
    }

    #[test]
    fn test_existing_table_with_other_key_is_mismatch() {
        let plan = calculate_deploy_plan(Some(&active(Some("PK"))), &libros_table_config());

        assert_eq!(
            plan,
            DeployPlan::KeyMismatch {
                table_name: "Libros".to_string(),
                expected: "id".to_string(),
                actual: "PK".to_string(),
            }
        );
    }

    #[test]
    fn test_destroy_plan() {
        assert_eq!(
            calculate_destroy_plan(Some(&active(None)), "Libros"),
            DestroyPlan::DeleteTable {
                table_name: "Libros".to_string()
            }
        );
        assert_eq!(
            calculate_destroy_plan(None, "Libros"),
            DestroyPlan::AlreadyGone {
                table_name: "Libros".to_string()
            }
        );
    }

    #[test]
    fn test_format_create_plan() {
        let lines = format_deploy_plan(&DeployPlan::CreateTable {
            config: libros_table_config(),
        });

        assert_eq!(lines[0], "+ Create table: Libros");
        assert_eq!(lines[1], "  Partition key: id (S)");
        assert_eq!(lines[2], "  Billing: PAY_PER_REQUEST");
    }
}

//! Resource naming conventions.
//!
//! Resolves the short local identifier a generated resource instance is
//! given, following the Azure Cloud Adoption Framework abbreviation list.
//! Resolution happens in-process so the same resource type always yields
//! the same token, and the composer can embed it literally in both the
//! main and outputs instructions.

use crate::error::{PromptError, PromptResult};

// CAF abbreviations keyed by the resource type's short name (the resource
// type with the provider prefix removed).
const ABBREVIATIONS: &[(&str, &str)] = &[
    ("api_management", "apim"),
    ("app_configuration", "appcs"),
    ("app_service_plan", "asp"),
    ("application_gateway", "agw"),
    ("application_insights", "appi"),
    ("application_security_group", "asg"),
    ("automation_account", "aa"),
    ("availability_set", "avail"),
    ("bastion_host", "bas"),
    ("cdn_profile", "cdnp"),
    ("cognitive_account", "cog"),
    ("container_app", "ca"),
    ("container_app_environment", "cae"),
    ("container_group", "ci"),
    ("container_registry", "cr"),
    ("cosmosdb_account", "cosmos"),
    ("data_factory", "adf"),
    ("databricks_workspace", "dbw"),
    ("dns_zone", "dnsz"),
    ("eventgrid_topic", "evgt"),
    ("eventhub", "evh"),
    ("eventhub_namespace", "evhns"),
    ("express_route_circuit", "erc"),
    ("firewall", "afw"),
    ("firewall_policy", "afwp"),
    ("function_app", "func"),
    ("image", "img"),
    ("key_vault", "kv"),
    ("kubernetes_cluster", "aks"),
    ("lb", "lb"),
    ("linux_function_app", "func"),
    ("linux_virtual_machine", "vm"),
    ("linux_web_app", "app"),
    ("local_network_gateway", "lgw"),
    ("log_analytics_workspace", "log"),
    ("logic_app_workflow", "logic"),
    ("machine_learning_workspace", "mlw"),
    ("managed_disk", "disk"),
    ("mssql_database", "sqldb"),
    ("mssql_elasticpool", "sqlep"),
    ("mssql_managed_instance", "sqlmi"),
    ("mssql_server", "sql"),
    ("mysql_flexible_server", "mysql"),
    ("nat_gateway", "ng"),
    ("network_interface", "nic"),
    ("network_security_group", "nsg"),
    ("network_watcher", "nw"),
    ("postgresql_flexible_server", "psql"),
    ("private_endpoint", "pep"),
    ("public_ip", "pip"),
    ("public_ip_prefix", "ippre"),
    ("recovery_services_vault", "rsv"),
    ("redis_cache", "redis"),
    ("resource_group", "rg"),
    ("route_server", "rtserv"),
    ("route_table", "rt"),
    ("search_service", "srch"),
    ("service_plan", "asp"),
    ("servicebus_namespace", "sbns"),
    ("signalr_service", "sigr"),
    ("snapshot", "snap"),
    ("sql_database", "sqldb"),
    ("sql_server", "sql"),
    ("static_web_app", "stapp"),
    ("storage_account", "st"),
    ("stream_analytics_job", "asa"),
    ("subnet", "snet"),
    ("synapse_workspace", "syn"),
    ("traffic_manager_profile", "traf"),
    ("user_assigned_identity", "id"),
    ("virtual_hub", "vhub"),
    ("virtual_machine", "vm"),
    ("virtual_machine_scale_set", "vmss"),
    ("virtual_network", "vnet"),
    ("virtual_network_gateway", "vgw"),
    ("virtual_wan", "vwan"),
    ("vpn_gateway", "vpng"),
    ("web_application_firewall_policy", "waf"),
    ("windows_function_app", "func"),
    ("windows_virtual_machine", "vm"),
    ("windows_web_app", "app"),
];

/// Strip the provider prefix from a resource type,
/// e.g. `azurerm_storage_account` → `storage_account`.
pub fn short_name<'a>(provider_name: &str, resource_type: &'a str) -> &'a str {
    let prefix = format!("{}_", provider_name);
    resource_type.strip_prefix(&prefix).unwrap_or(resource_type)
}

/// Human-readable name for a resource type,
/// e.g. `azurerm_route_server` → `Route Server`.
pub fn display_name(provider_name: &str, resource_type: &str) -> String {
    short_name(provider_name, resource_type)
        .split('_')
        .filter(|segment| !segment.is_empty())
        .map(|segment| {
            let mut chars = segment.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Resolve the naming token for a resource type.
///
/// Known resource types resolve from the CAF table; unknown ones fall back
/// to the first letter of each short-name segment (`storage_container` →
/// `sc`), keeping resolution deterministic for any input.
pub fn resolve_naming_token(provider_name: &str, resource_type: &str) -> PromptResult<String> {
    let short = short_name(provider_name, resource_type);
    if short.is_empty() {
        return Err(PromptError::InvalidResourceType(resource_type.to_string()));
    }

    if let Some((_, abbreviation)) = ABBREVIATIONS.iter().find(|(name, _)| *name == short) {
        return Ok((*abbreviation).to_string());
    }

    let fallback: String = short
        .split('_')
        .filter_map(|segment| segment.chars().next())
        .collect();
    if fallback.is_empty() {
        return Err(PromptError::InvalidResourceType(resource_type.to_string()));
    }
    Ok(fallback)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_hits() {
        assert_eq!(
            resolve_naming_token("azurerm", "azurerm_storage_account").unwrap(),
            "st"
        );
        assert_eq!(
            resolve_naming_token("azurerm", "azurerm_route_server").unwrap(),
            "rtserv"
        );
        assert_eq!(
            resolve_naming_token("azurerm", "azurerm_kubernetes_cluster").unwrap(),
            "aks"
        );
    }

    #[test]
    fn test_fallback_uses_segment_initials() {
        assert_eq!(
            resolve_naming_token("azurerm", "azurerm_storage_container").unwrap(),
            "sc"
        );
        assert_eq!(
            resolve_naming_token("azurerm", "azurerm_monitor_action_group").unwrap(),
            "mag"
        );
    }

    #[test]
    fn test_resolution_is_deterministic() {
        let first = resolve_naming_token("azurerm", "azurerm_storage_container").unwrap();
        let second = resolve_naming_token("azurerm", "azurerm_storage_container").unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_invalid_resource_type() {
        assert!(resolve_naming_token("azurerm", "azurerm_").is_err());
        assert!(resolve_naming_token("azurerm", "").is_err());
    }

    #[test]
    fn test_display_name() {
        assert_eq!(
            display_name("azurerm", "azurerm_route_server"),
            "Route Server"
        );
        assert_eq!(
            display_name("azurerm", "azurerm_storage_account"),
            "Storage Account"
        );
    }
}

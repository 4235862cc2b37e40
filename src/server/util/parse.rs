use crate::server::model::settings::{ExtraEndpoint, REQUIRED_SCOPES};

/// Parses the comma separated scopes setting.
///
/// The result always starts with `identify` and `email`, followed by the configured
/// scopes in order. Blank entries and duplicates are dropped.
///
/// # Arguments
/// - `value` - Raw scopes setting, e.g. `"guilds, connections"`
///
/// # Returns
/// - `Vec<String>` - Effective scopes to request
pub fn parse_scopes(value: &str) -> Vec<String> {
    let mut scopes: Vec<String> = REQUIRED_SCOPES.iter().map(|s| s.to_string()).collect();

    for scope in value.split(',').map(str::trim).filter(|s| !s.is_empty()) {
        if !scopes.iter().any(|existing| existing == scope) {
            scopes.push(scope.to_string());
        }
    }

    scopes
}

/// Parses the newline separated `path|name` endpoints setting.
///
/// Lines that are blank, lack a `|`, have an empty side, or whose path does not start
/// with `/` are skipped with a warning.
///
/// # Arguments
/// - `value` - Raw endpoints setting
///
/// # Returns
/// - `Vec<ExtraEndpoint>` - Endpoints in configured order
pub fn parse_endpoints(value: &str) -> Vec<ExtraEndpoint> {
    value
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .filter_map(|line| {
            let endpoint = line.split_once('|').and_then(|(path, name)| {
                let (path, name) = (path.trim(), name.trim());
                (path.starts_with('/') && !name.is_empty()).then(|| ExtraEndpoint {
                    path: path.to_string(),
                    name: name.to_string(),
                })
            });

            if endpoint.is_none() {
                tracing::warn!("Ignoring malformed Discord endpoint setting '{}'", line);
            }

            endpoint
        })
        .collect()
}

/// Returns `value` if it is a local path safe to redirect to after login.
///
/// Only absolute paths on this host are accepted; protocol-relative (`//host`) and
/// backslash variants are rejected.
pub fn parse_destination(value: &str) -> Option<String> {
    let value = value.trim();

    let is_local = value.starts_with('/')
        && !value.starts_with("//")
        && !value.starts_with("/\\")
        && !value.contains(['\r', '\n']);

    is_local.then(|| value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scopes_default_to_identify_and_email() {
        assert_eq!(parse_scopes(""), vec!["identify", "email"]);
    }

    #[test]
    fn scopes_append_configured_values_without_duplicates() {
        assert_eq!(
            parse_scopes(" guilds ,connections,,identify, guilds"),
            vec!["identify", "email", "guilds", "connections"]
        );
    }

    #[test]
    fn endpoints_parse_path_name_pairs() {
        let endpoints = parse_endpoints("/users/@me/guilds|user_guilds\r\n/users/@me/connections | connections\n");

        assert_eq!(
            endpoints,
            vec![
                ExtraEndpoint {
                    path: "/users/@me/guilds".to_string(),
                    name: "user_guilds".to_string(),
                },
                ExtraEndpoint {
                    path: "/users/@me/connections".to_string(),
                    name: "connections".to_string(),
                },
            ]
        );
    }

    #[test]
    fn endpoints_skip_malformed_lines() {
        let endpoints = parse_endpoints("no-separator\n|missing_path\n/users/@me|\nusers|relative\n\n/ok|ok");

        assert_eq!(endpoints.len(), 1);
        assert_eq!(endpoints[0].name, "ok");
    }

    #[test]
    fn destination_accepts_local_paths() {
        assert_eq!(parse_destination("/node/1?x=2"), Some("/node/1?x=2".to_string()));
    }

    #[test]
    fn destination_rejects_foreign_targets() {
        assert_eq!(parse_destination("https://evil.example"), None);
        assert_eq!(parse_destination("//evil.example"), None);
        assert_eq!(parse_destination("/\\evil.example"), None);
        assert_eq!(parse_destination(""), None);
    }
}

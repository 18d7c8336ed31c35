use pe_config::PeConfig;

/// Emit warnings for likely mistyped env var keys that silently fell back to defaults.
pub fn warn_unconfigured(config: &PeConfig) {
    for warning in collect_unconfigured_warnings(config, std::env::vars()) {
        tracing::warn!("{warning}");
    }
}

fn collect_unconfigured_warnings<I>(config: &PeConfig, env: I) -> Vec<String>
where
    I: IntoIterator<Item = (String, String)>,
{
    let env_keys = env.into_iter().map(|(key, _)| key).collect::<Vec<_>>();
    let mut warnings = Vec::new();

    if !config.data.is_configured() && has_single_underscore_key(&env_keys, "PEREVIEW_DATA") {
        warnings.push(
            "data.csv_file is unset while PEREVIEW_DATA* env vars exist. Use double underscores (example: PEREVIEW_DATA__CSV_FILE)."
                .to_string(),
        );
    }

    for section in ["PEREVIEW_DISPLAY", "PEREVIEW_REVIEW"] {
        if has_single_underscore_key(&env_keys, section) {
            warnings.push(format!(
                "{section}_* env vars are ignored. Use double underscores (example: {section}__<FIELD>)."
            ));
        }
    }

    warnings
}

/// Whether a key uses the section prefix with a single underscore separator.
fn has_single_underscore_key(keys: &[String], prefix: &str) -> bool {
    keys.iter().any(|key| {
        key.strip_prefix(prefix)
            .is_some_and(|rest| rest.starts_with('_') && !rest.starts_with("__"))
    })
}

#[cfg(test)]
mod tests {
    use pe_config::PeConfig;
    use pretty_assertions::assert_eq;

    use super::collect_unconfigured_warnings;

    fn env(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(key, value)| ((*key).to_string(), (*value).to_string()))
            .collect()
    }

    #[test]
    fn warns_on_single_underscore_data_key() {
        let warnings = collect_unconfigured_warnings(
            &PeConfig::default(),
            env(&[("PEREVIEW_DATA_CSV_FILE", "reports.csv")]),
        );
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("PEREVIEW_DATA__CSV_FILE"));
    }

    #[test]
    fn double_underscore_keys_are_quiet() {
        let warnings = collect_unconfigured_warnings(
            &PeConfig::default(),
            env(&[
                ("PEREVIEW_DATA__CSV_FILE", "reports.csv"),
                ("PEREVIEW_REVIEW__AUTO_ADVANCE", "false"),
                ("PEREVIEW_LOG", "debug"),
            ]),
        );
        assert!(warnings.is_empty(), "{warnings:?}");
    }

    #[test]
    fn warns_per_misnamed_section() {
        let warnings = collect_unconfigured_warnings(
            &PeConfig::default(),
            env(&[
                ("PEREVIEW_DISPLAY_REFLOW", "false"),
                ("PEREVIEW_REVIEW_LOCK_TIMEOUT_SECS", "3"),
            ]),
        );
        assert_eq!(warnings.len(), 2);
    }
}

// ABOUTME: Integration tests for configuration parsing and validation.
// ABOUTME: Tests YAML parsing, env var interpolation, crontab validation, and file loading.

use redeploy_operator::config::*;
use redeploy_operator::error::Error;
use std::io::Write;
use std::time::Duration;

mod parsing {
    use super::*;

    #[test]
    fn parse_minimal_config() {
        let yaml = r#"
releases:
  - crontab: "*/5 * * * *"
    project: Shop
    environments: [Prod]
    trigger: current
"#;
        let config = Config::from_yaml(yaml).unwrap();
        assert_eq!(config.settle_delay, DEFAULT_SETTLE_DELAY);
        assert_eq!(config.releases.len(), 1);

        let trigger = &config.releases[0];
        assert_eq!(trigger.project.as_str(), "Shop");
        assert_eq!(trigger.crontab.as_str(), "*/5 * * * *");
        assert_eq!(trigger.trigger, TriggerMode::Current);
        assert!(!trigger.auto_approve);
        assert_eq!(trigger.release_definitions, Default::default());
    }

    #[test]
    fn parse_full_config() {
        let yaml = r#"
settleDelay: 250ms
releases:
  - crontab: "0 30 2 * * Mon-Fri"
    project: Shop
    environments:
      - Prod
      - " Stage "
      - Prod
    trigger: latest
    autoApprove: true
    releaseDefinitions:
      searchText: web
      path: \Apps
      isExactNameMatch: false
      tagFilter: [nightly, web]
      definitionIdFilter: ["1", "2"]
  - crontab: "0 0 * * *"
    project: Other
    environments: [Dev]
    trigger: current
"#;
        let config = Config::from_yaml(yaml).unwrap();
        assert_eq!(config.settle_delay, Duration::from_millis(250));
        assert_eq!(config.releases.len(), 2);

        let trigger = &config.releases[0];
        let environments: Vec<&str> = trigger.environments.iter().map(String::as_str).collect();
        assert_eq!(environments, vec!["Prod", "Stage"]);
        assert!(trigger.auto_approve);

        let filter = &trigger.release_definitions;
        assert_eq!(filter.search_text.as_deref(), Some("web"));
        assert_eq!(filter.path.as_deref(), Some("\\Apps"));
        assert_eq!(filter.is_exact_name_match, Some(false));
        assert_eq!(
            filter.tag_filter,
            Some(vec!["nightly".to_string(), "web".to_string()])
        );
    }

    #[test]
    fn unknown_trigger_mode_is_rejected() {
        let yaml = r#"
releases:
  - crontab: "*/5 * * * *"
    project: Shop
    environments: [Prod]
    trigger: newest
"#;
        let err = Config::from_yaml(yaml).unwrap_err();
        assert!(err.to_string().contains("unknown trigger mode"));
    }

    #[test]
    fn invalid_crontab_is_rejected() {
        let yaml = r#"
releases:
  - crontab: "every tuesday"
    project: Shop
    environments: [Prod]
    trigger: current
"#;
        assert!(matches!(Config::from_yaml(yaml), Err(Error::Yaml(_))));
    }

    #[test]
    fn empty_environment_list_is_rejected() {
        let yaml = r#"
releases:
  - crontab: "*/5 * * * *"
    project: Shop
    environments: []
    trigger: current
"#;
        let err = Config::from_yaml(yaml).unwrap_err();
        assert!(err.to_string().contains("at least one environment"));
    }

    #[test]
    fn blank_project_is_rejected() {
        let yaml = r#"
releases:
  - crontab: "*/5 * * * *"
    project: "  "
    environments: [Prod]
    trigger: current
"#;
        assert!(Config::from_yaml(yaml).is_err());
    }

    #[test]
    fn document_without_triggers_fails_validation() {
        let config = Config::from_yaml("settleDelay: 1s\n").unwrap();
        assert!(matches!(config.validate(), Err(Error::NoTriggers)));
    }
}

mod loading {
    use super::*;

    const TEMPLATE: &str = r#"
settleDelay: ${SETTLE_DELAY:-0s}
releases:
  - crontab: "*/5 * * * *"
    project: ${REDEPLOY_PROJECT}
    environments: [Prod]
    trigger: ${REDEPLOY_MODE:-current}
"#;

    fn write_config(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn load_interpolates_environment() {
        let file = write_config(TEMPLATE);
        temp_env::with_vars(
            [
                ("REDEPLOY_PROJECT", Some("Shop")),
                ("REDEPLOY_MODE", Some("latest")),
                ("SETTLE_DELAY", None),
            ],
            || {
                let config = Config::load(file.path()).unwrap();
                assert_eq!(config.settle_delay, Duration::ZERO);
                assert_eq!(config.releases[0].project.as_str(), "Shop");
                assert_eq!(config.releases[0].trigger, TriggerMode::Latest);
            },
        );
    }

    #[test]
    fn load_fails_on_missing_variable() {
        let file = write_config(TEMPLATE);
        temp_env::with_var_unset("REDEPLOY_PROJECT", || {
            let err = Config::load(file.path()).unwrap_err();
            assert!(matches!(err, Error::MissingEnvVar(ref name) if name == "REDEPLOY_PROJECT"));
        });
    }

    #[test]
    fn load_fails_on_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.yaml");
        assert!(matches!(
            Config::load(&path),
            Err(Error::ConfigNotFound(ref p)) if *p == path
        ));
    }

    #[test]
    fn load_rejects_empty_trigger_list() {
        let file = write_config("releases: []\n");
        assert!(matches!(Config::load(file.path()), Err(Error::NoTriggers)));
    }
}

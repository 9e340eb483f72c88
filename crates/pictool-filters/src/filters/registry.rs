// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Filter registry — looks plug-ins up by name and resolves their parameters
// from command-line values, config overrides, and declared defaults.

use std::collections::BTreeMap;

use pictool_core::ToolConfig;
use pictool_core::error::{PictoolError, Result};
use pictool_core::types::{ParamKind, Params, Value};
use tracing::debug;

use super::{
    Blur, Brighten, Dered, Filter, Flip, Mono, PixelDump, Pixellate, Rotate, Scramble, Transpose,
    Vignette,
};

/// Name-keyed collection of filter plug-ins.
#[derive(Debug, Default)]
pub struct FilterRegistry {
    filters: BTreeMap<&'static str, Box<dyn Filter>>,
}

impl FilterRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding every built-in filter.
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        registry.register(PixelDump);
        registry.register(Dered);
        registry.register(Mono);
        registry.register(Flip);
        registry.register(Transpose);
        registry.register(Rotate);
        registry.register(Vignette);
        registry.register(Blur);
        registry.register(Pixellate);
        registry.register(Scramble);
        registry.register(Brighten);
        registry
    }

    /// Add a filter, replacing any previous filter with the same name.
    pub fn register(&mut self, filter: impl Filter + 'static) {
        let name = filter.name();
        if self.filters.insert(name, Box::new(filter)).is_some() {
            debug!(name, "Replaced previously registered filter");
        }
    }

    /// Look a filter up by name.
    pub fn get(&self, name: &str) -> Result<&dyn Filter> {
        self.filters
            .get(name)
            .map(|filter| filter.as_ref())
            .ok_or_else(|| PictoolError::UnknownFilter(name.to_owned()))
    }

    /// Registered filter names, sorted.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.filters.keys().copied()
    }

    /// Registered filters, sorted by name.
    pub fn iter(&self) -> impl Iterator<Item = &dyn Filter> + '_ {
        self.filters.values().map(|filter| filter.as_ref())
    }

    /// Build the parameter set for one invocation of `name`.
    ///
    /// Each declared parameter takes the first value found in `cli`, then the
    /// config's per-filter overrides, then its declared default. Options the
    /// filter does not declare are rejected, as are values of the wrong kind.
    pub fn resolve(
        &self,
        name: &str,
        cli: &[(String, Value)],
        config: &ToolConfig,
    ) -> Result<Params> {
        let filter = self.get(name)?;
        let specs = filter.params();

        let unknown = |param: &str| PictoolError::UnknownParameter {
            filter: name.to_owned(),
            param: param.to_owned(),
        };
        for (param, _) in cli {
            if !specs.iter().any(|spec| spec.name == param.as_str()) {
                return Err(unknown(param.as_str()));
            }
        }
        if let Some(overrides) = config.filters.get(name) {
            let undeclared = overrides
                .keys()
                .find(|param| !specs.iter().any(|spec| spec.name == param.as_str()));
            if let Some(param) = undeclared {
                return Err(unknown(param.as_str()));
            }
        }

        let mut params = Params::new(name);
        for spec in specs {
            let value = cli
                .iter()
                .find(|(param, _)| param == spec.name)
                .map(|(_, value)| value.clone())
                .or_else(|| config.override_for(name, spec.name).cloned())
                .unwrap_or_else(|| spec.default.into());

            if !value.fits(spec.kind) {
                let reason = match spec.kind {
                    ParamKind::Choice(options) => {
                        format!("'{value}' is not one of {}", options.join(", "))
                    }
                    kind => format!("'{value}' is not a valid {}", kind.value_name()),
                };
                return Err(PictoolError::invalid(name, spec.name, reason));
            }
            params.insert(spec.name, value);
        }
        Ok(params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_builtin_is_registered_under_its_name() {
        let registry = FilterRegistry::builtin();
        let names: Vec<_> = registry.names().collect();
        assert_eq!(
            names,
            vec![
                "blur", "brighten", "dered", "display", "flip", "mono", "pixellate", "rotate",
                "scramble", "transpose", "vignette",
            ]
        );
        for filter in registry.iter() {
            assert_eq!(registry.get(filter.name()).unwrap().name(), filter.name());
        }
    }

    #[test]
    fn unknown_filter_is_an_error() {
        let registry = FilterRegistry::builtin();
        assert!(matches!(
            registry.get("sharpen"),
            Err(PictoolError::UnknownFilter(name)) if name == "sharpen"
        ));
    }

    #[test]
    fn defaults_fill_unspecified_params() {
        let registry = FilterRegistry::builtin();
        let params = registry.resolve("blur", &[], &ToolConfig::default()).unwrap();
        assert_eq!(params.int("radius").unwrap(), 5);

        let params = registry.resolve("brighten", &[], &ToolConfig::default()).unwrap();
        assert_eq!(params.float("factor").unwrap(), 1.25);
    }

    #[test]
    fn cli_beats_config_beats_default() {
        let registry = FilterRegistry::builtin();
        let config =
            ToolConfig::from_json(r#"{"filters": {"scramble": {"amount": 10, "mode": "noise"}}}"#)
                .unwrap();

        let params = registry.resolve("scramble", &[], &config).unwrap();
        assert_eq!(params.int("amount").unwrap(), 10);
        assert_eq!(params.text("mode").unwrap(), "noise");

        let cli = vec![("amount".to_owned(), Value::Int(3))];
        let params = registry.resolve("scramble", &cli, &config).unwrap();
        assert_eq!(params.int("amount").unwrap(), 3);
    }

    #[test]
    fn undeclared_option_is_rejected() {
        let registry = FilterRegistry::builtin();
        let cli = vec![("radius".to_owned(), Value::Int(3))];
        assert!(matches!(
            registry.resolve("mono", &cli, &ToolConfig::default()),
            Err(PictoolError::UnknownParameter { param, .. }) if param == "radius"
        ));

        let config = ToolConfig::from_json(r#"{"filters": {"flip": {"diagonal": true}}}"#).unwrap();
        assert!(matches!(
            registry.resolve("flip", &[], &config),
            Err(PictoolError::UnknownParameter { .. })
        ));
    }

    #[test]
    fn wrong_kind_is_invalid() {
        let registry = FilterRegistry::builtin();
        let cli = vec![("sepia".to_owned(), Value::Int(1))];
        assert!(matches!(
            registry.resolve("mono", &cli, &ToolConfig::default()),
            Err(PictoolError::InvalidParameter { .. })
        ));

        let cli = vec![("mode".to_owned(), Value::Text("swirl".into()))];
        let err = registry
            .resolve("scramble", &cli, &ToolConfig::default())
            .unwrap_err();
        assert!(err.to_string().contains("noise"));
    }
}

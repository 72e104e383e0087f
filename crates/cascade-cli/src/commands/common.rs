//! Shared CLI helpers used across multiple commands.

use anyhow::Context;
use cascade_core::ParamDescriptor;
use cascade_eq::{ParamSnapshot, SharedParams, StereoEq, layout};
use clap::Args;
use std::path::PathBuf;
use std::sync::Arc;

/// Settings source shared by every command: a TOML file plus overrides.
#[derive(Args, Debug, Clone)]
pub struct SettingsArgs {
    /// TOML settings file (missing fields keep their defaults)
    #[arg(long, value_name = "FILE")]
    pub settings: Option<PathBuf>,

    /// Parameter override, by name, short name or ID (e.g. "LC Freq=80")
    #[arg(short, long = "param", value_name = "KEY=VALUE", value_parser = parse_key_val)]
    pub params: Vec<(String, String)>,

    /// Sample rate in Hz
    #[arg(long, default_value = "48000")]
    pub sample_rate: f32,
}

impl SettingsArgs {
    /// Loads the settings file, applies `--param` overrides in order and
    /// returns the populated parameter store.
    pub fn load(&self) -> anyhow::Result<SharedParams> {
        let snapshot = match &self.settings {
            Some(path) => {
                let text = std::fs::read_to_string(path)
                    .with_context(|| format!("reading {}", path.display()))?;
                toml::from_str::<ParamSnapshot>(&text)
                    .with_context(|| format!("parsing {}", path.display()))?
            }
            None => ParamSnapshot::default(),
        };

        let params = SharedParams::from_snapshot(&snapshot);
        for (key, raw) in &self.params {
            let index = layout::find(key).ok_or_else(|| {
                anyhow::anyhow!(
                    "Unknown parameter '{}'. Use 'cascade params' to list parameters.",
                    key
                )
            })?;
            let desc = &layout::descriptors()[index];
            let value = parse_param_value(desc, raw)?;
            params.set(index, value);
            tracing::debug!(param = desc.string_id, value, "override");
        }
        Ok(params)
    }

    /// Builds a prepared [`StereoEq`] from the resolved settings.
    pub fn prepared_eq(&self, max_block_size: usize) -> anyhow::Result<StereoEq> {
        let params = Arc::new(self.load()?);
        let mut eq = StereoEq::new(params);
        eq.prepare(self.sample_rate, max_block_size)?;
        eq.update_filters();
        Ok(eq)
    }
}

/// Parse a `key=value` string for clap's `value_parser`.
pub fn parse_key_val(s: &str) -> Result<(String, String), String> {
    let parts: Vec<&str> = s.splitn(2, '=').collect();
    if parts.len() != 2 {
        return Err(format!(
            "Invalid parameter format: '{}' (expected key=value)",
            s
        ));
    }
    Ok((parts[0].trim().to_string(), parts[1].trim().to_string()))
}

/// Parses a plain value for `desc`.
///
/// Choice parameters also accept a label ("48 db/Oct") or its leading
/// number ("48").
pub fn parse_param_value(desc: &ParamDescriptor, raw: &str) -> anyhow::Result<f32> {
    let by_label = desc.choices.iter().position(|label| {
        label.eq_ignore_ascii_case(raw) || label.split_whitespace().next() == Some(raw)
    });
    if let Some(position) = by_label {
        return Ok(desc.min + position as f32);
    }

    raw.parse::<f32>()
        .with_context(|| format!("invalid value '{}' for {}", raw, desc.name))
}

/// Formats `value` with the descriptor's unit, or its label for choices.
pub fn format_value(desc: &ParamDescriptor, value: f32) -> String {
    match desc.choice_label(value) {
        Some(label) => label.to_string(),
        None => format!("{}{}", value, desc.unit.suffix()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_val_splits_on_first_equals() {
        assert_eq!(
            parse_key_val("LC Freq = 80"),
            Ok(("LC Freq".to_string(), "80".to_string()))
        );
        assert_eq!(
            parse_key_val("a=b=c"),
            Ok(("a".to_string(), "b=c".to_string()))
        );
        assert!(parse_key_val("novalue").is_err());
    }

    #[test]
    fn slope_accepts_labels_numbers_and_indices() {
        let desc = &layout::descriptors()[layout::LOW_CUT_SLOPE];
        assert_eq!(parse_param_value(desc, "48 db/Oct").ok(), Some(3.0));
        assert_eq!(parse_param_value(desc, "24").ok(), Some(1.0));
        assert_eq!(parse_param_value(desc, "2").ok(), Some(2.0));
        assert!(parse_param_value(desc, "steep").is_err());
    }

    #[test]
    fn overrides_apply_in_order() {
        let args = SettingsArgs {
            settings: None,
            params: vec![
                ("peak1_gain".to_string(), "3".to_string()),
                ("P1 Gain".to_string(), "-6".to_string()),
                ("HC Slope".to_string(), "36".to_string()),
            ],
            sample_rate: 48000.0,
        };
        let snapshot = args.load().expect("valid overrides").snapshot();
        assert_eq!(snapshot.peaks[0].gain_db, -6.0);
        assert_eq!(snapshot.high_cut_slope, cascade_eq::Slope::Db36);
    }

    #[test]
    fn unknown_override_is_an_error() {
        let args = SettingsArgs {
            settings: None,
            params: vec![("resonance".to_string(), "1".to_string())],
            sample_rate: 48000.0,
        };
        let err = args.load().expect_err("unknown parameter");
        assert!(err.to_string().contains("resonance"));
    }

    #[test]
    fn format_uses_units_and_labels() {
        let lc = &layout::descriptors()[layout::LOW_CUT_FREQ];
        assert_eq!(format_value(lc, 80.0), "80 Hz");
        let slope = &layout::descriptors()[layout::HIGH_CUT_SLOPE];
        assert_eq!(format_value(slope, 1.0), "24 db/Oct");
    }
}

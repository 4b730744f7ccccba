use crate::settings::Settings;
use pascalart::mode::{
    FractalPredicate, HockeyStickSelection, ModeParams, ViewMode, DEFAULT_ROWS, MIN_ROWS,
};

/// Values supplied on the command line. `None` defers to the config file.
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub mode: Option<ViewMode>,
    pub rows: Option<usize>,
    pub speed: Option<f32>,
    pub fractal_predicate: Option<FractalPredicate>,
    pub prime_row: Option<usize>,
    pub binomial_row: Option<usize>,
    pub start_col: Option<usize>,
    pub length: Option<usize>,
}

/// Fully resolved startup configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub rows: usize,
    pub mode: ViewMode,
    pub params: ModeParams,
    pub print: bool,
}

impl AppConfig {
    /// Merge CLI flags over file settings over built-in defaults
    pub fn resolve(cli: CliOverrides, settings: &Settings, print: bool) -> Result<Self, String> {
        let file = &settings.defaults;

        let rows = cli.rows.or(file.rows).unwrap_or(DEFAULT_ROWS);
        if rows < MIN_ROWS {
            return Err(format!("rows must be at least {} (got {})", MIN_ROWS, rows));
        }

        let mode = match cli.mode {
            Some(mode) => mode,
            None => file
                .mode
                .as_deref()
                .map(str::parse::<ViewMode>)
                .transpose()?
                .unwrap_or(ViewMode::RowSum),
        };

        let mut params = ModeParams::new(rows);
        if let Some(speed) = cli.speed.or(file.speed) {
            params.fibonacci_delay = speed;
        }
        let predicate = match cli.fractal_predicate {
            Some(p) => Some(p),
            None => file
                .fractal_predicate
                .as_deref()
                .map(str::parse::<FractalPredicate>)
                .transpose()?,
        };
        if let Some(p) = predicate {
            params.fractal_predicate = p;
        }
        if let Some(row) = cli.prime_row.or(file.prime_row) {
            params.prime_row = row;
        }
        if let Some(row) = cli.binomial_row.or(file.binomial_row) {
            params.binomial_row = row;
        }
        let start_col = cli.start_col.or(file.start_col).unwrap_or(params.hockey.start_col);
        let length = cli.length.or(file.length).unwrap_or(params.hockey.length);
        params.hockey = HockeyStickSelection::clamped(rows, start_col, length);
        params.fit_to(rows);

        Ok(Self {
            rows,
            mode,
            params,
            print,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_without_input() {
        let config = AppConfig::resolve(CliOverrides::default(), &Settings::default(), false).unwrap();
        assert_eq!(config.rows, DEFAULT_ROWS);
        assert_eq!(config.mode, ViewMode::RowSum);
        assert_eq!(config.params, ModeParams::new(DEFAULT_ROWS));
    }

    #[test]
    fn cli_overrides_file() {
        let settings = Settings::parse("[defaults]\nmode = \"prime\"\nrows = 10\nprime_row = 5").unwrap();
        let cli = CliOverrides {
            rows: Some(12),
            ..Default::default()
        };
        let config = AppConfig::resolve(cli, &settings, false).unwrap();
        assert_eq!(config.rows, 12);
        assert_eq!(config.mode, ViewMode::PrimeRow);
        assert_eq!(config.params.prime_row, 5);
    }

    #[test]
    fn out_of_range_values_clamped() {
        let cli = CliOverrides {
            rows: Some(8),
            speed: Some(5.0),
            prime_row: Some(40),
            start_col: Some(30),
            ..Default::default()
        };
        let config = AppConfig::resolve(cli, &Settings::default(), false).unwrap();
        assert_eq!(config.params.prime_row, 7);
        assert!((config.params.fibonacci_delay - 1.0).abs() < f32::EPSILON);
        assert_eq!(config.params.hockey.start_col, 6);
    }

    #[test]
    fn too_few_rows() {
        let cli = CliOverrides {
            rows: Some(1),
            ..Default::default()
        };
        assert!(AppConfig::resolve(cli, &Settings::default(), false).is_err());
    }

    #[test]
    fn bad_mode_in_file() {
        let settings = Settings::parse("[defaults]\nmode = \"spiral\"").unwrap();
        assert!(AppConfig::resolve(CliOverrides::default(), &settings, false).is_err());
    }
}

use std::fs::read_to_string;
use std::path::Path;

use serde::Deserialize;

use crate::Error;

/// Appearance settings for [crate::depict::Molecule::draw_svg] and
/// [crate::depict::Molecule::draw_png]. Any subset may be given in a TOML
/// file; missing keys keep their defaults.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DrawOptions {
    /// Stroke width of bond lines in pixels.
    pub line_width: f64,

    /// CSS font family used for atom labels.
    pub font_family: String,

    /// Label font size as a fraction of the drawn bond length.
    pub font_scale: f64,

    /// Fraction of each canvas dimension kept free on either side of the
    /// molecule.
    pub padding: f64,

    /// Canvas fill colour.
    pub background: String,

    /// Distance between the lines of a double or triple bond, as a fraction of
    /// the drawn bond length.
    pub multiple_bond_offset: f64,

    /// Upper limit on the drawn bond length in pixels, so that small molecules
    /// are not blown up to fill a large canvas.
    pub max_bond_length: f64,

    /// Colour heteroatom labels and their half-bonds by element. Otherwise
    /// everything is drawn in black.
    pub color_atoms: bool,
}

impl Default for DrawOptions {
    fn default() -> Self {
        Self {
            line_width: 2.0,
            font_family: "sans-serif".to_owned(),
            font_scale: 0.5,
            padding: 0.05,
            background: "#FFFFFF".to_owned(),
            multiple_bond_offset: 0.15,
            max_bond_length: 50.0,
            color_atoms: true,
        }
    }
}

impl DrawOptions {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = path.as_ref();
        let config_err = |source: Box<dyn std::error::Error + Send + Sync>| Error::Config {
            path: path.to_owned(),
            source,
        };
        let text = read_to_string(path).map_err(|e| config_err(Box::new(e)))?;
        toml::from_str(&text).map_err(|e| config_err(Box::new(e)))
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    fn write_config(name: &str, text: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir()
            .join(format!("smidraw-config-{}-{name}.toml", std::process::id()));
        fs::write(&path, text).unwrap();
        path
    }

    #[test]
    fn partial_file() {
        let path = write_config("partial", "line_width = 1.5\ncolor_atoms = false\n");
        let got = DrawOptions::load(&path).unwrap();
        fs::remove_file(&path).unwrap();
        let want = DrawOptions {
            line_width: 1.5,
            color_atoms: false,
            ..DrawOptions::default()
        };
        assert_eq!(got, want);
    }

    #[test]
    fn unknown_key() {
        let path = write_config("unknown", "line_wdith = 1.5\n");
        let got = DrawOptions::load(&path);
        fs::remove_file(&path).unwrap();
        assert!(matches!(got, Err(Error::Config { .. })));
    }

    #[test]
    fn missing_file() {
        let got = DrawOptions::load("/nonexistent/smidraw.toml");
        let Err(e) = got else {
            panic!("expected an error");
        };
        assert!(e.to_string().contains("/nonexistent/smidraw.toml"));
    }
}

use std::{
    fs,
    io::{BufRead, BufReader, Read},
    path::Path,
};

use log::{debug, info};

use config::DrawOptions;
use depict::Molecule;

pub mod config;
pub mod depict;
pub mod error;

pub use error::Error;

/// resolve the SMILES text to draw. an inline `smiles` wins over `input`; the
/// inline value `-` reads all of `stdin` instead. from a file only the first
/// line is used. the result is trimmed, and may be empty
pub fn read_smiles(
    smiles: Option<&str>,
    input: Option<&Path>,
    mut stdin: impl Read,
) -> Result<String, Error> {
    match (smiles.filter(|s| !s.is_empty()), input) {
        (Some("-"), _) => {
            let mut buf = String::new();
            stdin.read_to_string(&mut buf).map_err(Error::Stdin)?;
            debug!("read {} bytes from stdin", buf.len());
            Ok(buf.trim().to_owned())
        }
        (Some(s), _) => Ok(s.trim().to_owned()),
        (None, Some(path)) => {
            let read_err = |source| Error::Read {
                path: path.to_owned(),
                source,
            };
            let f = fs::File::open(path).map_err(read_err)?;
            let mut line = String::new();
            BufReader::new(f).read_line(&mut line).map_err(read_err)?;
            Ok(line.trim().to_owned())
        }
        (None, None) => Err(Error::NoSource),
    }
}

/// parse `smiles` and generate its 2D coordinates
pub fn build_molecule(smiles: &str) -> Result<Molecule, Error> {
    let mut mol = Molecule::from_smiles(smiles)?;
    mol.compute_2d_coords();
    info!(
        "built {smiles} with {} atoms and {} bonds",
        mol.num_atoms(),
        mol.num_bonds()
    );
    Ok(mol)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ImageFormat {
    Png,
    Svg,
}

impl ImageFormat {
    /// `.svg` in any case selects SVG; every other path, including one with no
    /// extension, gets PNG
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("svg") => Self::Svg,
            _ => Self::Png,
        }
    }
}

/// render `mol` at `size` (width, height) into the format named by `path`'s
/// extension and write it there, creating missing parent directories. nothing
/// is written if rendering fails
pub fn save_drawing(
    mol: &Molecule,
    path: impl AsRef<Path>,
    size: (u32, u32),
    opts: &DrawOptions,
) -> Result<(), Error> {
    let path = path.as_ref();
    let write_err = |source| Error::Write {
        path: path.to_owned(),
        source,
    };
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir).map_err(write_err)?;
    }
    let (width, height) = size;
    let format = ImageFormat::from_path(path);
    let bytes = match format {
        ImageFormat::Svg => mol.draw_svg(width, height, opts).into_bytes(),
        ImageFormat::Png => mol.draw_png(width, height, opts)?,
    };
    fs::write(path, &bytes).map_err(write_err)?;
    info!(
        "wrote {width}x{height} {format:?} drawing ({} bytes) to {}",
        bytes.len(),
        path.display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::{io::Cursor, path::PathBuf};

    use super::*;

    fn scratch(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("smidraw-lib-{}-{name}", std::process::id()))
    }

    #[test]
    fn inline_smiles() {
        let got = read_smiles(Some(" CCO "), None, Cursor::new("")).unwrap();
        assert_eq!(got, "CCO");
    }

    #[test]
    fn stdin_smiles() {
        let got = read_smiles(Some("-"), None, Cursor::new("CCO\n")).unwrap();
        assert_eq!(got, "CCO");
    }

    #[test]
    fn inline_beats_file() {
        let got = read_smiles(
            Some("CCO"),
            Some(Path::new("/nonexistent")),
            Cursor::new(""),
        )
        .unwrap();
        assert_eq!(got, "CCO");
    }

    #[test]
    fn file_first_line() {
        let path = scratch("first-line.smi");
        fs::write(&path, "c1ccccc1 benzene\nCCO\n").unwrap();
        let got = read_smiles(Some(""), Some(&path), Cursor::new(""));
        fs::remove_file(&path).unwrap();
        assert_eq!(got.unwrap(), "c1ccccc1 benzene");

        let path = scratch("empty-first-line.smi");
        fs::write(&path, "\nCCO\n").unwrap();
        let got = read_smiles(None, Some(&path), Cursor::new(""));
        fs::remove_file(&path).unwrap();
        assert_eq!(got.unwrap(), "");
    }

    #[test]
    fn missing_sources() {
        assert!(matches!(
            read_smiles(None, None, Cursor::new("CCO")),
            Err(Error::NoSource)
        ));
        assert!(matches!(
            read_smiles(None, Some(Path::new("/nonexistent/in.smi")), Cursor::new("")),
            Err(Error::Read { .. })
        ));
    }

    #[test]
    fn invalid_message() {
        let err = build_molecule("not_a_molecule").unwrap_err();
        assert_eq!(err.to_string(), "Invalid SMILES string: not_a_molecule");
    }

    #[test]
    fn formats() {
        assert_eq!(ImageFormat::from_path(Path::new("a.svg")), ImageFormat::Svg);
        assert_eq!(ImageFormat::from_path(Path::new("a.SVG")), ImageFormat::Svg);
        assert_eq!(ImageFormat::from_path(Path::new("a.png")), ImageFormat::Png);
        assert_eq!(ImageFormat::from_path(Path::new("a.jpg")), ImageFormat::Png);
        assert_eq!(ImageFormat::from_path(Path::new("svg")), ImageFormat::Png);
    }

    #[test]
    fn save_nested_svg() {
        let root = scratch("nested");
        let path = root.join("a/b/mol.svg");
        let mol = build_molecule("c1ccccc1O").unwrap();
        save_drawing(&mol, &path, (200, 150), &DrawOptions::default()).unwrap();
        let text = fs::read_to_string(&path).unwrap();
        fs::remove_dir_all(&root).unwrap();
        assert!(text.contains("viewBox='0 0 200 150'"));
    }
}

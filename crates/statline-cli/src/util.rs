use std::{
    fs::File,
    io::{self, BufWriter, StdoutLock, Write as _},
    path::{Path, PathBuf},
    sync::Arc,
};

use anyhow::Context;
use statline_analysis::{cache::DatasetCache, dataset::Dataset, source::JsonDirSource};
use tracing::info;

#[derive(Debug)]
pub enum Output {
    Stdout {
        writer: StdoutLock<'static>,
    },
    File {
        writer: BufWriter<File>,
        path: PathBuf,
    },
}

impl Output {
    pub fn save_json<T>(value: &T, output_path: Option<PathBuf>) -> anyhow::Result<()>
    where
        T: serde::Serialize + ?Sized,
    {
        let mut output = Output::from_output_path(output_path)?;
        output.write_json(value)?;
        if let Output::File { path, .. } = &output {
            info!(path = %path.display(), "wrote output");
        }
        Ok(())
    }

    pub fn from_output_path(output_path: Option<PathBuf>) -> anyhow::Result<Self> {
        match output_path {
            Some(path) => Output::open(path),
            None => Ok(Output::stdout()),
        }
    }

    pub fn stdout() -> Self {
        Output::Stdout {
            writer: io::stdout().lock(),
        }
    }

    pub fn open(path: PathBuf) -> anyhow::Result<Self> {
        let file = File::create(&path)
            .with_context(|| format!("Failed to create output file: {}", path.display()))?;
        Ok(Output::File {
            writer: BufWriter::new(file),
            path,
        })
    }

    pub fn display_path(&self) -> String {
        match self {
            Output::Stdout { .. } => "stdout".to_string(),
            Output::File { path, .. } => path.display().to_string(),
        }
    }

    pub fn write_json<T>(&mut self, value: &T) -> anyhow::Result<()>
    where
        T: serde::Serialize + ?Sized,
    {
        serde_json::to_writer_pretty(&mut *self, value)
            .with_context(|| format!("Failed to write JSON to {}", self.display_path()))?;
        writeln!(&mut *self).with_context(|| {
            format!(
                "Failed to write newline after JSON to {}",
                self.display_path()
            )
        })?;
        self.flush()
            .with_context(|| format!("Failed to flush output to {}", self.display_path()))?;
        Ok(())
    }
}

impl io::Write for Output {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            Output::Stdout { writer } => writer.write(buf),
            Output::File { writer, .. } => writer.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            Output::Stdout { writer } => writer.flush(),
            Output::File { writer, .. } => writer.flush(),
        }
    }
}

/// Loads, aggregates and normalizes every season file in `data_dir`.
pub fn load_dataset<P>(data_dir: P) -> anyhow::Result<Arc<Dataset>>
where
    P: AsRef<Path>,
{
    let data_dir = data_dir.as_ref();
    info!(dir = %data_dir.display(), "loading season files");
    let mut cache = DatasetCache::new(JsonDirSource::new(data_dir));
    cache
        .dataset()
        .with_context(|| format!("Failed to load season data from {}", data_dir.display()))
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    #[test]
    fn test_save_json_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.json");
        Output::save_json(&["2023_24", "2022_23"], Some(path.clone())).unwrap();

        let text = fs::read_to_string(&path).unwrap();
        assert!(text.ends_with('\n'));
        let value: Vec<String> = serde_json::from_str(&text).unwrap();
        assert_eq!(value, ["2023_24", "2022_23"]);
    }

    #[test]
    fn test_load_dataset() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("2023_24.json"),
            r#"[
                { "Rk": 1, "Player": "Ann", "Pos": "C", "Age": 30, "Team": "BOS", "G": 70, "PTS": 20.1 },
                { "Rk": 2, "Player": "Bob", "Pos": "PG", "Age": 24, "Team": "NYK", "G": 5, "PTS": 3.0 }
            ]"#,
        )
        .unwrap();

        let dataset = load_dataset(dir.path()).unwrap();
        assert_eq!(dataset.len(), 1);
        assert_eq!(dataset.record(0).player, "Ann");
        assert_eq!(dataset.seasons(), ["2023_24"]);
    }

    #[test]
    fn test_load_dataset_missing_dir() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_dataset(dir.path().join("missing")).unwrap_err();
        assert!(err.to_string().starts_with("Failed to load season data"));
    }
}

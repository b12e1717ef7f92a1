// src/output.rs - input discovery and timestamped JPEG output

use crate::constants::{INPUT_EXTENSION, TIMESTAMP_FORMAT};
use crate::error::Result;
use image::RgbImage;
use image::codecs::jpeg::JpegEncoder;
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};

/// Decide which map files to render.
///
/// Explicit arguments win. Otherwise every `.json` file directly inside `in_dir`
/// (sorted by name). When `in_dir` is missing or empty the single `default_input`
/// is used. A directory holding only other files yields nothing.
pub fn collect_input_paths(args: &[PathBuf], in_dir: &Path, default_input: &Path) -> Vec<PathBuf> {
    if !args.is_empty() {
        return args.to_vec();
    }

    let entries: Vec<PathBuf> = match fs::read_dir(in_dir) {
        Ok(read_dir) => read_dir.filter_map(|e| e.ok()).map(|e| e.path()).collect(),
        Err(_) => return vec![default_input.to_path_buf()],
    };
    if entries.is_empty() {
        return vec![default_input.to_path_buf()];
    }

    let mut paths: Vec<PathBuf> = entries
        .into_iter()
        .filter(|p| p.is_file() && p.extension().is_some_and(|ext| ext == INPUT_EXTENSION))
        .collect();
    paths.sort();
    paths
}

/// File stem used as the output base name ("maps/north.json" -> "north").
pub fn map_name(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "map".to_string())
}

pub fn timestamp_now() -> String {
    chrono::Local::now().format(TIMESTAMP_FORMAT).to_string()
}

pub fn output_path(out_dir: &Path, map_name: &str, timestamp: &str) -> PathBuf {
    out_dir.join(format!("{}_{}.jpg", map_name, timestamp))
}

/// Write `image` as `{out_dir}/{map_name}_{timestamp}.jpg`, creating `out_dir`.
pub fn save_image(
    image: &RgbImage,
    out_dir: &Path,
    map_name: &str,
    timestamp: &str,
    quality: u8,
) -> Result<PathBuf> {
    fs::create_dir_all(out_dir)?;
    let path = output_path(out_dir, map_name, timestamp);

    let mut writer = BufWriter::new(File::create(&path)?);
    JpegEncoder::new_with_quality(&mut writer, quality).encode_image(image)?;

    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    #[test]
    fn test_explicit_args_win() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a.json"), "{}").unwrap();
        let args = vec![PathBuf::from("x.json"), PathBuf::from("y.json")];
        let paths = collect_input_paths(&args, dir.path(), Path::new("input.json"));
        assert_eq!(paths, args);
    }

    #[test]
    fn test_scans_json_files() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("b.json"), "{}").unwrap();
        fs::write(dir.path().join("a.json"), "{}").unwrap();
        fs::write(dir.path().join("notes.txt"), "").unwrap();
        fs::create_dir(dir.path().join("nested.json")).unwrap();

        let paths = collect_input_paths(&[], dir.path(), Path::new("input.json"));
        assert_eq!(paths, vec![dir.path().join("a.json"), dir.path().join("b.json")]);
    }

    #[test]
    fn test_fallback_to_default_input() {
        let dir = tempfile::tempdir().unwrap();
        let default_input = Path::new("input.json");

        let paths = collect_input_paths(&[], dir.path(), default_input);
        assert_eq!(paths, vec![PathBuf::from("input.json")]);

        let missing = dir.path().join("missing");
        let paths = collect_input_paths(&[], &missing, default_input);
        assert_eq!(paths, vec![PathBuf::from("input.json")]);
    }

    #[test]
    fn test_non_json_directory_yields_nothing() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("readme.md"), "").unwrap();
        assert!(collect_input_paths(&[], dir.path(), Path::new("input.json")).is_empty());
    }

    #[test]
    fn test_map_name_and_output_path() {
        assert_eq!(map_name(Path::new("HEXMAP_IN/north.json")), "north");
        assert_eq!(map_name(Path::new("plain")), "plain");
        assert_eq!(
            output_path(Path::new("out"), "north", "20240102_030405"),
            PathBuf::from("out/north_20240102_030405.jpg")
        );
        assert_eq!(timestamp_now().len(), "YYYYmmdd_HHMMSS".len());
    }

    #[test]
    fn test_save_image_writes_jpeg() {
        let dir = tempfile::tempdir().unwrap();
        let out_dir = dir.path().join("HEXMAP_OUT");
        let image = RgbImage::from_pixel(16, 8, Rgb([10, 200, 30]));

        let path = save_image(&image, &out_dir, "demo", "20240102_030405", 95).unwrap();
        assert_eq!(path, out_dir.join("demo_20240102_030405.jpg"));

        let reloaded = image::open(&path).unwrap();
        assert_eq!((reloaded.width(), reloaded.height()), (16, 8));
    }
}

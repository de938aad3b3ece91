//! Tests for tile discovery, naming and decoding

#[cfg(test)]
mod tests {
    use edgemotif::io::image::{
        is_image_file, list_image_files, load_rgb_pixels, parse_tile_id, reference_image_path,
        rgb_to_array,
    };
    use image::{Rgb, RgbImage, Rgba, RgbaImage};
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    // Tests tile ids parsed from filename stems
    // Verified by parsing the full filename instead of the stem
    #[test]
    fn test_parse_tile_id() {
        assert_eq!(parse_tile_id(Path::new("tiles/07.png")), Some(7));
        assert_eq!(parse_tile_id(Path::new("256.jpg")), Some(256));
        assert_eq!(parse_tile_id(Path::new("1x4.png")), None);
        assert_eq!(parse_tile_id(Path::new("-3.png")), None);
        assert_eq!(parse_tile_id(Path::new("corner.png")), None);
    }

    // Tests two-digit reference naming
    // Verified by formatting without zero padding
    #[test]
    fn test_reference_image_path() {
        let dir = Path::new("forms");
        assert_eq!(reference_image_path(dir, 3), dir.join("03.png"));
        assert_eq!(reference_image_path(dir, 22), dir.join("22.png"));
    }

    // Tests that listing keeps image files only, sorted by name
    // Verified by returning directory order
    #[test]
    fn test_list_image_files() {
        let Ok(dir) = TempDir::new() else {
            unreachable!("temporary directory");
        };
        let img = RgbImage::from_pixel(4, 4, Rgb([1, 2, 3]));
        for name in ["10.png", "2.png", "notes.png", "01.bmp"] {
            assert!(img.save(dir.path().join(name)).is_ok());
        }
        assert!(fs::write(dir.path().join("readme.txt"), "tiles").is_ok());
        assert!(fs::create_dir(dir.path().join("sub.png")).is_ok());

        let Ok(files) = list_image_files(dir.path()) else {
            unreachable!("directory is readable");
        };
        let names: Vec<String> = files
            .iter()
            .filter_map(|p| p.file_name().map(|n| n.to_string_lossy().to_string()))
            .collect();
        assert_eq!(names, vec!["01.bmp", "10.png", "2.png", "notes.png"]);
        assert!(!is_image_file(&dir.path().join("readme.txt")));
    }

    // Tests that listing a missing directory is an error
    // Verified by returning an empty list instead
    #[test]
    fn test_list_missing_directory() {
        assert!(list_image_files(Path::new("definitely/not/here")).is_err());
    }

    // Tests decoding to (row, col, channel) with alpha dropped
    // Verified by transposing rows and columns
    #[test]
    fn test_load_rgb_pixels_layout() {
        let Ok(dir) = TempDir::new() else {
            unreachable!("temporary directory");
        };
        let mut img = RgbaImage::from_pixel(3, 2, Rgba([0, 0, 0, 255]));
        img.put_pixel(2, 1, Rgba([10, 20, 30, 0]));
        let path = dir.path().join("5.png");
        assert!(img.save(&path).is_ok());

        let Ok(pixels) = load_rgb_pixels(&path) else {
            unreachable!("saved image decodes");
        };
        assert_eq!(pixels.dim(), (2, 3, 3));
        assert_eq!(pixels[(1, 2, 0)], 10);
        assert_eq!(pixels[(1, 2, 1)], 20);
        assert_eq!(pixels[(1, 2, 2)], 30);
        assert_eq!(pixels[(0, 0, 0)], 0);
    }

    // Tests that a corrupt file reports its path
    // Verified by dropping the path from the error
    #[test]
    fn test_load_corrupt_image() {
        let Ok(dir) = TempDir::new() else {
            unreachable!("temporary directory");
        };
        let path = dir.path().join("9.png");
        assert!(fs::write(&path, b"garbage").is_ok());

        let err = load_rgb_pixels(&path).err().map(|e| e.to_string()).unwrap_or_default();
        assert!(err.contains("9.png"));
    }

    // Tests direct buffer conversion
    // Verified by skipping the last column
    #[test]
    fn test_rgb_to_array() {
        let img = RgbImage::from_fn(2, 2, |x, y| Rgb([x as u8, y as u8, 7]));
        let pixels = rgb_to_array(&img);
        assert_eq!(pixels[(0, 1, 0)], 1);
        assert_eq!(pixels[(1, 0, 1)], 1);
        assert_eq!(pixels[(1, 1, 2)], 7);
    }
}

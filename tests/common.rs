#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use std::env;
use std::fs;
use std::path::PathBuf;

pub fn ponto() -> Command {
    cargo_bin_cmd!("ponto")
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_ponto.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

/// Create a per-test media directory for watermarked photos
pub fn setup_media_dir(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_ponto_media", name));
    let p = path.to_string_lossy().to_string();
    fs::remove_dir_all(&p).ok();
    fs::create_dir_all(&p).ok();
    p
}

/// Create a temporary output file path inside tempdir and ensure it's removed
pub fn temp_out(name: &str, ext: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_out.{}", name, ext));
    let p = path.to_string_lossy().to_string();
    fs::remove_file(&p).ok();
    p
}

/// Write a small valid JPEG to feed the photo arguments
pub fn make_photo(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_photo.jpg", name));
    let img = image::RgbImage::from_pixel(80, 60, image::Rgb([40u8, 80, 120]));
    img.save(&path).expect("write test photo");
    path.to_string_lossy().to_string()
}

/// Write a photo file larger than the 5 MB upload cap
pub fn make_oversized_photo(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_big_photo.jpg", name));
    fs::write(&path, vec![0u8; 6 * 1024 * 1024]).expect("write oversized test photo");
    path.to_string_lossy().to_string()
}

/// Initialize DB schema and seed one market/vehicle/driver (ids all 1)
pub fn init_db_with_refdata(db_path: &str) {
    ponto()
        .args(["--db", db_path, "--test", "init"])
        .assert()
        .success();

    ponto()
        .args(["--db", db_path, "market", "add", "Mercado Sul"])
        .assert()
        .success();

    ponto()
        .args([
            "--db", db_path, "vehicle", "add", "ABC1D23", "--modelo", "Uno", "--cor", "Branco",
        ])
        .assert()
        .success();

    ponto()
        .args([
            "--db",
            db_path,
            "driver",
            "add",
            "João Silva",
            "--cpf",
            "111.222.333-44",
            "--telefone",
            "11 99999-0000",
            "--valor-dia",
            "150",
            "--veiculo",
            "1",
            "--mercado",
            "1",
        ])
        .assert()
        .success();
}

/// Record today's entry for driver 1 through the CLI
pub fn record_entry(db_path: &str, media_dir: &str, name: &str, odometer: &str) {
    let photo1 = make_photo(&format!("{name}_odo"));
    let photo2 = make_photo(&format!("{name}_fuel"));

    ponto()
        .args([
            "--db",
            db_path,
            "--media-dir",
            media_dir,
            "entry",
            "1",
            "--odometer",
            odometer,
            "--fuel",
            "75",
            "--odometer-photo",
            &photo1,
            "--fuel-photo",
            &photo2,
        ])
        .assert()
        .success();
}

/// Record today's exit for driver 1 through the CLI
pub fn record_exit(db_path: &str, media_dir: &str, name: &str, odometer: &str) {
    let photo1 = make_photo(&format!("{name}_odo_out"));
    let photo2 = make_photo(&format!("{name}_fuel_out"));

    ponto()
        .args([
            "--db",
            db_path,
            "--media-dir",
            media_dir,
            "exit",
            "1",
            "--odometer",
            odometer,
            "--fuel",
            "40",
            "--odometer-photo",
            &photo1,
            "--fuel-photo",
            &photo2,
        ])
        .assert()
        .success();
}

/// Today's date as the store keys it
pub fn today_str() -> String {
    chrono::Local::now().format("%Y-%m-%d").to_string()
}

mod common;
use common::{
    init_db_with_refdata, ponto, record_entry, record_exit, setup_media_dir, setup_test_db,
};
use predicates::prelude::*;

#[test]
fn test_status_progresses_through_the_day() {
    let db = setup_test_db("status_progress");
    let media = setup_media_dir("status_progress");
    init_db_with_refdata(&db);

    ponto()
        .args(["--db", &db, "status", "1", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("nao_iniciou"));

    record_entry(&db, &media, "status_progress", "1000");

    ponto()
        .args(["--db", &db, "status", "1", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("trabalhando"));

    record_exit(&db, &media, "status_progress", "1080");

    ponto()
        .args(["--db", &db, "status", "1", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("finalizado"));
}

#[test]
fn test_status_table_lists_all_active_drivers() {
    let db = setup_test_db("status_all");
    init_db_with_refdata(&db);

    ponto()
        .args(["--db", &db, "status"])
        .assert()
        .success()
        .stdout(predicate::str::contains("João Silva"))
        .stdout(predicate::str::contains("Não iniciou"))
        .stdout(predicate::str::contains("Mercado Sul"));
}

#[test]
fn test_status_json_mirrors_driver_attributes() {
    let db = setup_test_db("status_json_all");
    init_db_with_refdata(&db);

    ponto()
        .args(["--db", &db, "status", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"success\": true"))
        .stdout(predicate::str::contains("ABC1D23"))
        .stdout(predicate::str::contains("nao_iniciou"));
}

#[test]
fn test_status_accepts_cpf_as_driver_key() {
    let db = setup_test_db("status_cpf");
    init_db_with_refdata(&db);

    ponto()
        .args(["--db", &db, "status", "111.222.333-44"])
        .assert()
        .success()
        .stdout(predicate::str::contains("João Silva"));
}

#[test]
fn test_status_for_a_past_date_is_not_started() {
    let db = setup_test_db("status_past");
    init_db_with_refdata(&db);

    ponto()
        .args(["--db", &db, "status", "1", "--date", "2020-01-01", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("nao_iniciou"));
}

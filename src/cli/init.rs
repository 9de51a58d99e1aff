use std::path::PathBuf;

use zeroize::Zeroize;

use crate::auth::Credentials;
use crate::db::{get_connection, init_db};
use crate::error::{LodgerError, Result};
use crate::settings::{load_settings, save_settings, shellexpand_path};

pub fn run(data_dir: Option<String>, user: Option<String>) -> Result<()> {
    let mut settings = load_settings();

    if let Some(dir) = data_dir {
        settings.data_dir = shellexpand_path(&dir);
    }

    let username = user
        .or_else(|| settings.admin.as_ref().map(|c| c.username.clone()))
        .unwrap_or_else(|| "admin".to_string());
    let mut password = read_admin_password(&username)?;
    settings.admin = Some(Credentials::create(&username, &password));
    password.zeroize();

    save_settings(&settings)?;

    let resolved = PathBuf::from(&settings.data_dir);
    std::fs::create_dir_all(&resolved)?;
    std::fs::create_dir_all(resolved.join("exports"))?;

    let conn = get_connection(&resolved.join("lodger.db"))?;
    init_db(&conn)?;

    println!("Initialized lodger at {}", resolved.display());
    println!("Administrator: {username}");
    Ok(())
}

/// `LODGER_ADMIN_PASSWORD` allows non-interactive setup; otherwise prompt
/// twice and require a match.
fn read_admin_password(username: &str) -> Result<String> {
    if let Ok(p) = std::env::var("LODGER_ADMIN_PASSWORD") {
        return Ok(p);
    }
    let mut first = rpassword::prompt_password(format!("Set password for {username}: "))?;
    let second = rpassword::prompt_password("Confirm password: ")?;
    if first != second {
        first.zeroize();
        return Err(LodgerError::Other("passwords do not match".to_string()));
    }
    first.zeroize();
    Ok(second)
}

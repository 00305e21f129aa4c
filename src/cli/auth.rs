use crate::auth::AuthService;
use crate::cli::ui;
use anyhow::Result;

pub async fn register(auth: &AuthService, name: &str, pin: &str) -> Result<()> {
    let user = auth.register(name, pin).await?;
    println!(
        "Welcome, {}! You are now logged in.",
        ui::style_text(&user.name, ui::StyleType::Title)
    );
    Ok(())
}

pub async fn login(auth: &AuthService, name: &str, pin: &str) -> Result<()> {
    let user = auth.login(name, pin).await?;
    println!(
        "Logged in as {}.",
        ui::style_text(&user.name, ui::StyleType::Title)
    );
    Ok(())
}

pub async fn logout(auth: &AuthService) -> Result<()> {
    auth.logout().await;
    println!("Logged out.");
    Ok(())
}

pub async fn whoami(auth: &AuthService) -> Result<()> {
    match auth.current_user().await {
        Some(user) => {
            println!(
                "{} (registered {})",
                ui::style_text(&user.name, ui::StyleType::Title),
                ui::style_text(
                    &user.created_at.format("%d %b %Y").to_string(),
                    ui::StyleType::Subtle
                )
            );
        }
        None => println!("Not logged in."),
    }
    Ok(())
}

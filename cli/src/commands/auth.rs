use clap::Args;
use gazopti_sdk::screens::LoginScreen;

use crate::error::CliError;
use crate::utils::apply_effect;

#[derive(Args, Clone)]
pub struct LoginCommand {
    /// Account email
    #[arg(short, long)]
    email: String,

    /// Account password (prompted when omitted)
    #[arg(short, long)]
    password: Option<String>,
}

impl LoginCommand {
    pub async fn execute(self, client: &gazopti_sdk::GazOptiClient) -> Result<(), CliError> {
        let password = match self.password {
            Some(password) => password,
            None => dialoguer::Password::new()
                .with_prompt("Password")
                .interact()
                .map_err(|e| CliError::Command(format!("Password input error: {}", e)))?,
        };

        let mut screen = LoginScreen::new();
        screen.form.email = self.email;
        screen.form.password = password;

        let effect = screen.submit(client).await;
        apply_effect(effect)?;
        Ok(())
    }
}

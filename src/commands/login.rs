use anyhow::Result;
use clap::Args;

use crate::api::BackendClient;

#[derive(Args, Debug)]
pub struct LoginArgs {
    /// Account email
    #[arg(long)]
    pub email: String,
    /// Account password
    #[arg(long)]
    pub password: String,
}

pub async fn login(client: &mut BackendClient, args: &LoginArgs) -> Result<()> {
    let user = client.login(&args.email, &args.password).await?;
    println!("Logged in as {} ({})", user.email, user.id);
    Ok(())
}

pub fn logout(client: &mut BackendClient) -> Result<()> {
    client.logout()?;
    println!("Session cleared.");
    Ok(())
}

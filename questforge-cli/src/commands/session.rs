use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use questforge_core::{Role, SessionContext, SessionStore, SessionUser, UserId, visible_nav_links};
use tracing::info;

use crate::config::QuestforgeConfig;

#[derive(Args)]
pub struct SessionArgs {
    #[command(subcommand)]
    pub command: SessionCommands,
}

#[derive(Subcommand)]
pub enum SessionCommands {
    /// Show the signed-in user and active role
    Show {
        /// Print the raw session as JSON
        #[arg(long)]
        json: bool,
    },
    /// Sign in as a user
    Login {
        #[arg(long)]
        id: UserId,
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        /// Roles held, comma separated
        #[arg(long, value_delimiter = ',', required = true)]
        roles: Vec<Role>,
    },
    /// Switch the active role to another one the user holds
    Switch { role: Role },
    /// Sign out
    Logout,
}

pub async fn run(args: SessionArgs, config: &QuestforgeConfig) -> Result<()> {
    let store = open_store(config).await?;

    match args.command {
        SessionCommands::Show { json } => {
            let session = store.get().await;
            if json {
                println!("{}", serde_json::to_string_pretty(&session)?);
            } else {
                print_session(&session);
            }
        }
        SessionCommands::Login {
            id,
            name,
            email,
            roles,
        } => {
            let user = SessionUser::new(id, name, email).with_roles(roles);
            let default_role = config.session.default_role;
            let session = store
                .update(|session| {
                    session.login(user);
                    enter_default_role(session, default_role);
                    Ok(())
                })
                .await?;
            info!(path = %store.path().display(), "session saved");
            print_session(&session);
        }
        SessionCommands::Switch { role } => {
            let session = store
                .update(|session| session.switch_role(role))
                .await
                .with_context(|| format!("cannot switch to {}", role.label()))?;
            print_session(&session);
        }
        SessionCommands::Logout => {
            store.clear().await?;
            println!("Signed out");
        }
    }
    Ok(())
}

pub async fn open_store(config: &QuestforgeConfig) -> Result<SessionStore> {
    SessionStore::load(&config.session.store_dir)
        .await
        .with_context(|| {
            format!(
                "failed to open session store in {}",
                config.session.store_dir.display()
            )
        })
}

/// Prefer the configured role when the user holds it
fn enter_default_role(session: &mut SessionContext, default_role: Option<Role>) {
    if let Some(role) = default_role
        && let Err(e) = session.switch_role(role)
    {
        info!(error = %e, "keeping most privileged role");
    }
}

fn print_session(session: &SessionContext) {
    let Some(user) = session.user() else {
        println!("Not signed in");
        return;
    };

    println!("User:   {} <{}> (id {})", user.name, user.email, user.id);
    match session.active_role() {
        Some(role) => println!("Role:   {}", role.label()),
        None => println!("Role:   none"),
    }
    let others: Vec<&str> = session
        .switchable_roles()
        .into_iter()
        .filter(|role| Some(*role) != session.active_role())
        .map(|role| role.label())
        .collect();
    if !others.is_empty() {
        println!("Switch: {}", others.join(", "));
    }
    let links: Vec<&str> = visible_nav_links(&session.permissions())
        .into_iter()
        .map(|link| link.label)
        .collect();
    println!("Menu:   {}", links.join(", "));
}

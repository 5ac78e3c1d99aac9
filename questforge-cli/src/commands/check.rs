//! One-off ownership checks, mainly for scripting and support

use anyhow::Result;
use clap::{Args, ValueEnum};
use questforge_core::{
    OwnershipContext, ResourceType, Role, UserId, can_delete_resource, can_edit_resource,
    can_manage_team_members, can_restore_resource,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CheckAction {
    Edit,
    Delete,
    ManageMembers,
    Restore,
}

#[derive(Args, Debug)]
pub struct CheckArgs {
    pub action: CheckAction,

    /// Active role of the acting user
    #[arg(long)]
    pub role: Role,

    /// Resource type: user, team, project or task
    #[arg(long, default_value = "team")]
    pub resource: ResourceType,

    /// Id of the acting user
    #[arg(long)]
    pub user: Option<UserId>,

    /// Owner of a user record
    #[arg(long)]
    pub owner: Option<UserId>,

    #[arg(long)]
    pub manager: Option<UserId>,

    /// User who created or assigned the resource
    #[arg(long)]
    pub created_by: Option<UserId>,

    #[arg(long)]
    pub lead: Option<UserId>,
}

impl CheckArgs {
    fn ownership(&self) -> OwnershipContext {
        OwnershipContext {
            current_user_id: self.user,
            owner_id: self.owner,
            manager_id: self.manager,
            created_by_id: self.created_by,
            lead_id: self.lead,
            ..OwnershipContext::default()
        }
    }

    fn evaluate(&self) -> bool {
        let ctx = self.ownership();
        match self.action {
            CheckAction::Edit => can_edit_resource(self.role, self.resource, &ctx),
            CheckAction::Delete => can_delete_resource(self.role, self.resource, &ctx),
            CheckAction::ManageMembers => can_manage_team_members(self.role, &ctx),
            CheckAction::Restore => can_restore_resource(self.role, self.resource),
        }
    }
}

/// Prints the verdict; a denial exits with status 1
pub fn run(args: CheckArgs) -> Result<()> {
    if args.evaluate() {
        println!("allowed");
        Ok(())
    } else {
        println!("denied");
        std::process::exit(1);
    }
}

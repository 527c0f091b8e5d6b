
use anyhow::{anyhow, Result};
use chrono::NaiveDate;
use clap::{Args, Subcommand};
use inquire::Confirm;

use tatami_data::{
    Delete, Insert, Member, MemberFilter, NotificationMeta, Query, Retrieve, Update,
};
use tatami_db::Connection;
use tatami_ledger::{datetime, notify};

use crate::formatting::PrintFormatted;

#[derive(Subcommand, Debug)]
pub enum Members {
    /// Show a member
    #[clap(name="show")]
    Show(ShowMember),
    /// List members
    #[clap(name="list")]
    List(ListMembers),
    /// Enroll a member
    #[clap(name="add")]
    Add(AddMember),
    /// Update a member
    #[clap(name="set")]
    Update(UpdateMember),
    /// Delete a member
    #[clap(name="delete")]
    Delete(DeleteMember),
}

impl Members {
    pub async fn run(self, db: &Connection) -> Result<()> {
        match self {
            Members::Show(cmd) => cmd.run(db).await,
            Members::List(cmd) => cmd.run(db).await,
            Members::Add(cmd) => cmd.run(db).await,
            Members::Update(cmd) => cmd.run(db).await,
            Members::Delete(cmd) => cmd.run(db).await,
        }
    }
}

#[derive(Args, Debug)]
pub struct ShowMember {
    #[clap(short, long)]
    pub id: u32,
}

impl ShowMember {
    /// Run the command and show a member
    pub async fn run(self, db: &Connection) -> Result<()> {
        let member: Member = db.retrieve(self.id).await?;
        println!("");
        member.print_formatted();
        println!("");
        Ok(())
    }
}

#[derive(Args, Debug)]
pub struct ListMembers {
    #[clap(short, long)]
    pub id: Option<u32>,
    #[clap(short, long)]
    pub name: Option<String>,
    #[clap(short, long)]
    pub email: Option<String>,
    #[clap(short, long)]
    pub activity: Option<String>,
}

impl ListMembers {
    /// Run the command and list members
    pub async fn run(self, db: &Connection) -> Result<()> {
        // Create member filter
        let filter = MemberFilter{
            id: self.id,
            name: self.name,
            email: self.email,
            activity: self.activity,
        };

        let members: Vec<Member> = db.query(&filter).await?;
        println!("{} members.", members.len());
        members.print_formatted();

        Ok(())
    }
}

#[derive(Args, Debug)]
pub struct AddMember{
    #[clap(short, long)]
    pub first_name: String,
    #[clap(short, long)]
    pub last_name: String,
    #[clap(short, long)]
    pub email: String,
    #[clap(short, long)]
    pub phone: Option<String>,
    #[clap(short, long)]
    pub activity: Option<String>,
    #[clap(long)]
    pub membership_start: Option<NaiveDate>,
}

impl AddMember {
    /// Run the command and enroll a member
    pub async fn run(self, db: &Connection) -> Result<()>
    {
        let membership_start = self.membership_start.unwrap_or(datetime::today());

        // Check if a member with this email already exists
        let members: Vec<Member> = db.query(&MemberFilter{
            email: Some(self.email.clone()),
            ..Default::default()
        }).await?;
        if members.len() > 0 {
            return Err(anyhow!(
                "Member with email {} already exists.", self.email));
        }

        let member = Member{
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
            phone: self.phone.unwrap_or("".to_string()),
            activity: self.activity.unwrap_or("".to_string()),
            membership_start: membership_start,
            ..Default::default()
        };

        println!("");
        member.print_formatted();
        println!("");

        // Confirm adding member
        let confirm = Confirm::new("Add member?").with_default(true);
        if !confirm.prompt()? {
            return Ok(());
        }

        let member = db.insert(member).await?;
        notify(
            db,
            format!("New member enrolled: {}", member.full_name()),
            NotificationMeta::MemberJoined { member_id: member.id },
        )
        .await?;
        println!("Member added with id {}.", member.id);

        Ok(())
    }
}


#[derive(Args, Debug)]
pub struct UpdateMember{
    #[clap(short, long)]
    pub id: u32,
    #[clap(short, long)]
    pub first_name: Option<String>,
    #[clap(short, long)]
    pub last_name: Option<String>,
    #[clap(short, long)]
    pub email: Option<String>,
    #[clap(short, long)]
    pub phone: Option<String>,
    #[clap(short, long)]
    pub activity: Option<String>,
    #[clap(long)]
    pub membership_start: Option<NaiveDate>,
    #[clap(long)]
    pub membership_end: Option<NaiveDate>,
}

impl UpdateMember {
    /// Run command and update a member
    pub async fn run(self, db: &Connection) -> Result<()> {
        let member: Member = db.retrieve(self.id).await?;
        let mut update = member.clone();

        if let Some(first_name) = self.first_name {
            update.first_name = first_name.clone();
        }
        if let Some(last_name) = self.last_name {
            update.last_name = last_name.clone();
        }
        if let Some(email) = self.email {
            update.email = email.clone();
        }
        if let Some(phone) = self.phone {
            update.phone = phone.clone();
        }
        if let Some(activity) = self.activity {
            update.activity = activity.clone();
        }
        if let Some(membership_start) = self.membership_start {
            update.membership_start = membership_start;
        }
        if let Some(membership_end) = self.membership_end {
            update.membership_end = Some(membership_end);
        }

        println!("");
        (member.clone(), update.clone()).print_formatted();
        println!("");
        let confirm = Confirm::new("Update member?").with_default(true);
        if !confirm.prompt()? {
            return Ok(());
        }

        if update.email != member.email {
            let members: Vec<Member> = db.query(&MemberFilter{
                email: Some(update.email.clone()),
                ..Default::default()
            }).await?;
            if members.len() > 0 {
                return Err(anyhow!(
                    "Member with email {} already exists.", update.email));
            }
        }

        db.update(update).await?;

        Ok(())
    }
}


#[derive(Args, Debug)]
pub struct DeleteMember{
    #[clap(short, long)]
    pub id: u32,
}


impl DeleteMember {
    pub async fn run(&self, db: &Connection) -> Result<()> {
        let member: Member = db.retrieve(self.id).await?;
        println!("");
        member.print_formatted();
        println!("");
        let confirm = Confirm::new("Delete member from database?")
            .with_default(true);
        if !confirm.prompt()? {
            return Ok(());
        }
        db.delete(member).await?;
        Ok(())
    }
}

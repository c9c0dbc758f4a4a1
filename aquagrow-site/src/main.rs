//! AquaGrow back office
//!
//! ## Usage
//!
//! ```bash
//! # Serve the content functions
//! API_KEY=... aquagrow serve --http-port 8888
//!
//! # Manage records
//! aquagrow admin --username admin --password password list farmers
//! aquagrow admin add-farmer --name "Amina Hassan" --location "Kitui County"
//! aquagrow admin set-farmer-status F10234 active
//! aquagrow admin company set company.json
//!
//! # One-off generation
//! aquagrow generate faqs
//! aquagrow inquiry --name Daniel --subject Investing --message "Hello"
//! ```

use anyhow::Context;
use aquagrow_gateway::gateway::TEAM_PHOTO_SIZE;
use aquagrow_gateway::{ContactInquiry, ContentGateway, ImageService};
use aquagrow_site::config::default_data_dir;
use aquagrow_site::{AdminConsole, AdminSession, Site, SiteConfig};
use aquagrow_store::{
    CompanyInfo, FarmerStatus, InvestorStatus, NewFarmer, NewInvestor, NewTeamMember,
};
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "aquagrow")]
#[command(about = "AquaGrow records and generated site content")]
struct Args {
    /// Path to config file [default: <data dir>/config.toml]
    #[arg(short, long, env = "AQUAGROW_CONFIG")]
    config: Option<PathBuf>,

    /// Data directory for the record database
    #[arg(long, env = "AQUAGROW_DATA_DIR")]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the content functions HTTP server
    Serve {
        #[arg(long)]
        http_port: Option<u16>,
    },

    /// Record administration (requires sign-in)
    Admin {
        #[arg(long, env = "AQUAGROW_ADMIN_USER")]
        username: String,

        #[arg(long, env = "AQUAGROW_ADMIN_PASSWORD", hide_env_values = true)]
        password: String,

        #[command(subcommand)]
        action: AdminAction,
    },

    /// Generate site content and print it as JSON
    Generate {
        #[arg(value_enum)]
        what: ContentKind,
    },

    /// Triage a single contact inquiry
    Inquiry {
        #[arg(long)]
        name: String,
        #[arg(long, default_value = "")]
        email: String,
        #[arg(long)]
        subject: String,
        #[arg(long)]
        message: String,
    },
}

#[derive(Subcommand, Debug)]
enum AdminAction {
    /// List a collection, newest first
    List {
        #[arg(value_enum)]
        collection: CollectionKind,
    },
    /// Delete a record by id
    Delete {
        #[arg(value_enum)]
        collection: CollectionKind,
        id: String,
    },
    /// Record counts per collection
    Summary,
    AddFarmer {
        #[arg(long)]
        name: String,
        #[arg(long)]
        location: String,
        #[arg(long)]
        phone: Option<String>,
        #[arg(long, value_enum, default_value = "pending")]
        status: FarmerStatusArg,
    },
    AddInvestor {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        phone: Option<String>,
        #[arg(long)]
        amount: f64,
        #[arg(long, value_enum, default_value = "pending")]
        status: InvestorStatusArg,
    },
    AddTeamMember {
        #[arg(long)]
        name: String,
        #[arg(long)]
        role: String,
        #[arg(long)]
        bio: String,
        /// Defaults to a seeded placeholder photo
        #[arg(long)]
        image_url: Option<String>,
    },
    SetFarmerStatus {
        id: String,
        #[arg(value_enum)]
        status: FarmerStatusArg,
    },
    /// Company contact details
    Company {
        #[command(subcommand)]
        action: CompanyAction,
    },
}

#[derive(Subcommand, Debug)]
enum CompanyAction {
    Show,
    /// Replace with the contents of a JSON file
    Set { file: PathBuf },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum CollectionKind {
    Farmers,
    Investors,
    TeamMembers,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum ContentKind {
    Faqs,
    TeamMembers,
    SuccessStories,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum FarmerStatusArg {
    Active,
    Pending,
    Rejected,
}

impl From<FarmerStatusArg> for FarmerStatus {
    fn from(arg: FarmerStatusArg) -> Self {
        match arg {
            FarmerStatusArg::Active => FarmerStatus::Active,
            FarmerStatusArg::Pending => FarmerStatus::Pending,
            FarmerStatusArg::Rejected => FarmerStatus::Rejected,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum InvestorStatusArg {
    Active,
    Pending,
    Closed,
}

impl From<InvestorStatusArg> for InvestorStatus {
    fn from(arg: InvestorStatusArg) -> Self {
        match arg {
            InvestorStatusArg::Active => InvestorStatus::Active,
            InvestorStatusArg::Pending => InvestorStatus::Pending,
            InvestorStatusArg::Closed => InvestorStatus::Closed,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("aquagrow=info".parse()?))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => SiteConfig::load(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => SiteConfig::load_from_data_dir(
            args.data_dir.clone().unwrap_or_else(default_data_dir),
        )?,
    };
    if let Some(dir) = args.data_dir {
        config.data_dir = dir;
    }

    match args.command {
        Command::Serve { http_port } => {
            if let Some(port) = http_port {
                config.http_port = port;
            }
            let site = Site::open(config)?;
            if !site.gateway().backend_available().await {
                warn!(backend = %site.gateway().backend_id(), "Content backend is not reachable; generation calls will fail");
            }
            let server = Arc::new(site.functions_server());
            info!(addr = %server.bind_addr(), "Starting AquaGrow functions server");
            server.run().await?;
        }
        Command::Admin {
            username,
            password,
            action,
        } => {
            let (gate, console) = Site::open_admin(&config)?;
            let session = gate.login(&username, &password)?;
            run_admin(&console, &session, &config, action).await?;
            gate.logout(session);
        }
        Command::Generate { what } => {
            let gateway = ContentGateway::with_config(config.llm.build_backend()?, config.content);
            match what {
                ContentKind::Faqs => print_json(&gateway.faqs().await?)?,
                ContentKind::TeamMembers => print_json(&gateway.team_members().await?)?,
                ContentKind::SuccessStories => print_json(&gateway.success_stories().await?)?,
            }
        }
        Command::Inquiry {
            name,
            email,
            subject,
            message,
        } => {
            let gateway = ContentGateway::with_config(config.llm.build_backend()?, config.content);
            let inquiry = ContactInquiry {
                name,
                email,
                subject,
                message,
            };
            print_json(&gateway.triage_inquiry(&inquiry).await?)?;
        }
    }

    Ok(())
}

async fn run_admin(
    console: &AdminConsole,
    session: &AdminSession,
    config: &SiteConfig,
    action: AdminAction,
) -> anyhow::Result<()> {
    match action {
        AdminAction::List { collection } => match collection {
            CollectionKind::Farmers => print_json(&console.farmers(session).list().await?)?,
            CollectionKind::Investors => print_json(&console.investors(session).list().await?)?,
            CollectionKind::TeamMembers => {
                print_json(&console.team_members(session).list().await?)?
            }
        },
        AdminAction::Delete { collection, id } => {
            match collection {
                CollectionKind::Farmers => console.farmers(session).delete(&id).await?,
                CollectionKind::Investors => console.investors(session).delete(&id).await?,
                CollectionKind::TeamMembers => console.team_members(session).delete(&id).await?,
            }
            info!(id = %id, "Record deleted");
        }
        AdminAction::Summary => print_json(&console.summary(session).await?)?,
        AdminAction::AddFarmer {
            name,
            location,
            phone,
            status,
        } => {
            let farmer = console
                .farmers(session)
                .create(NewFarmer {
                    name,
                    location,
                    phone,
                    status: status.into(),
                })
                .await?;
            print_json(&farmer)?;
        }
        AdminAction::AddInvestor {
            name,
            email,
            phone,
            amount,
            status,
        } => {
            let investor = console
                .investors(session)
                .create(NewInvestor {
                    name,
                    email,
                    phone,
                    investment_amount: amount,
                    status: status.into(),
                })
                .await?;
            print_json(&investor)?;
        }
        AdminAction::AddTeamMember {
            name,
            role,
            bio,
            image_url,
        } => {
            let image_url = image_url.unwrap_or_else(|| {
                let (width, height) = TEAM_PHOTO_SIZE;
                ImageService::new(config.content.image_base_url.as_str())
                    .url(&name, width, height)
            });
            let member = console
                .team_members(session)
                .create(NewTeamMember {
                    name,
                    role,
                    bio,
                    image_url,
                })
                .await?;
            print_json(&member)?;
        }
        AdminAction::SetFarmerStatus { id, status } => {
            let farmers = console.farmers(session);
            let mut farmer = farmers.get(&id).await?;
            farmer.status = status.into();
            print_json(&farmers.update(farmer).await?)?;
        }
        AdminAction::Company { action } => match action {
            CompanyAction::Show => print_json(&console.company_info(session).await?)?,
            CompanyAction::Set { file } => {
                let content = std::fs::read_to_string(&file)
                    .with_context(|| format!("reading {}", file.display()))?;
                let info: CompanyInfo = serde_json::from_str(&content)
                    .with_context(|| format!("parsing company info from {}", file.display()))?;
                print_json(&console.replace_company_info(session, info).await?)?;
            }
        },
    }

    Ok(())
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

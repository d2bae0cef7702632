//! PayHub CLI
//!
//! Runs gateway operations against the PayHub API from the command line.

mod config;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use payhub_client::ReqwestTransport;
use payhub_gateway::PayHubGateway;
use payhub_types::{Address, CreditCard, Customer, GatewayResponse, Money, PaymentOptions};

use crate::config::Credentials;

#[derive(Parser)]
#[command(name = "payhub")]
#[command(author, version, about = "PayHub gateway CLI", long_about = None)]
struct Cli {
    #[command(flatten)]
    credentials: Credentials,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(flatten)]
    Operation(Operation),
    /// Print gateway metadata
    Info,
}

#[derive(Subcommand)]
enum Operation {
    /// Authorize an amount without capturing it
    Authorize {
        /// Amount in cents
        #[arg(long)]
        amount: i64,
        #[command(flatten)]
        card: CardArgs,
        #[command(flatten)]
        options: OptionArgs,
    },
    /// Authorize and capture in one step
    Purchase {
        /// Amount in cents
        #[arg(long)]
        amount: i64,
        #[command(flatten)]
        card: CardArgs,
        #[command(flatten)]
        options: OptionArgs,
    },
    /// Capture a prior authorization
    Capture {
        /// Amount in cents
        #[arg(long)]
        amount: i64,
        /// Transaction id returned by authorize
        transaction_id: String,
    },
    /// Void a transaction
    Void {
        transaction_id: String,
    },
    /// Refund a transaction, voiding it first when still possible
    Refund {
        /// Amount in cents
        #[arg(long)]
        amount: i64,
        transaction_id: String,
    },
    /// Check a card without charging it
    Verify {
        #[command(flatten)]
        card: CardArgs,
        #[command(flatten)]
        options: OptionArgs,
    },
}

impl Operation {
    fn name(&self) -> &'static str {
        match self {
            Operation::Authorize { .. } => "authorize",
            Operation::Purchase { .. } => "purchase",
            Operation::Capture { .. } => "capture",
            Operation::Void { .. } => "void",
            Operation::Refund { .. } => "refund",
            Operation::Verify { .. } => "verify",
        }
    }
}

#[derive(Args, Debug)]
struct CardArgs {
    /// Card number
    #[arg(long)]
    card_number: String,
    /// Expiry month (1-12)
    #[arg(long)]
    exp_month: u8,
    /// Four-digit expiry year
    #[arg(long)]
    exp_year: u16,
    /// Card verification value
    #[arg(long)]
    cvv: Option<String>,
}

#[derive(Args, Debug, Default)]
struct OptionArgs {
    #[arg(long)]
    first_name: Option<String>,
    #[arg(long)]
    last_name: Option<String>,
    #[arg(long)]
    phone: Option<String>,
    #[arg(long)]
    email: Option<String>,
    #[arg(long)]
    address1: Option<String>,
    #[arg(long)]
    address2: Option<String>,
    #[arg(long)]
    city: Option<String>,
    #[arg(long)]
    state: Option<String>,
    #[arg(long)]
    zip: Option<String>,
    /// Tax amount in cents
    #[arg(long)]
    tax: Option<i64>,
    /// Shipping amount in cents
    #[arg(long)]
    shipping: Option<i64>,
    #[arg(long)]
    invoice: Option<String>,
}

impl CardArgs {
    fn to_card(&self) -> Result<CreditCard> {
        let mut card = CreditCard::new(&self.card_number, self.exp_month, self.exp_year)?;
        if let Some(cvv) = &self.cvv {
            card = card.with_verification_value(cvv);
        }
        Ok(card)
    }
}

impl OptionArgs {
    fn to_options(&self) -> Result<PaymentOptions> {
        let mut options = PaymentOptions::new();

        options = options.with_customer(Customer {
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            phone: self.phone.clone(),
            email: self.email.clone(),
        });

        let address = Address {
            address1: self.address1.clone(),
            address2: self.address2.clone(),
            city: self.city.clone(),
            state: self.state.clone(),
            zip: self.zip.clone(),
        };
        if !address.is_empty() {
            options = options.with_billing_address(address);
        }

        if let Some(tax) = self.tax {
            options = options.with_tax_amount(Money::new(tax)?);
        }
        if let Some(shipping) = self.shipping {
            options = options.with_shipping_amount(Money::new(shipping)?);
        }
        if let Some(invoice) = &self.invoice {
            options = options.with_invoice_number(invoice);
        }
        Ok(options)
    }
}

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info,payhub_gateway=debug".into());
    let registry = tracing_subscriber::registry().with(filter);

    // stdout carries the response JSON, so logs go to stderr
    if json {
        registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry.with(fmt::layer().with_writer(std::io::stderr)).init();
    }
}

fn print_info() {
    type Gateway = PayHubGateway<ReqwestTransport>;
    println!("{} ({})", Gateway::DISPLAY_NAME, Gateway::HOMEPAGE_URL);
    println!("Countries:   {}", Gateway::SUPPORTED_COUNTRIES.join(", "));
    println!("Currency:    {}", Gateway::DEFAULT_CURRENCY);
    println!("Card brands: {}", Gateway::SUPPORTED_CARD_BRANDS.join(", "));
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(cli.log_json);

    let operation = match cli.command {
        Commands::Info => {
            print_info();
            return Ok(());
        }
        Commands::Operation(operation) => operation,
    };

    let transport = ReqwestTransport::new().with_timeout(cli.credentials.timeout());
    let gateway = PayHubGateway::new(cli.credentials.gateway_config(), transport)?;

    info!(
        operation = operation.name(),
        test = gateway.is_test(),
        organization_id = gateway.merchant().organization_id(),
        "Running PayHub operation"
    );

    let response: GatewayResponse = match operation {
        Operation::Authorize {
            amount,
            card,
            options,
        } => {
            gateway
                .authorize(Money::new(amount)?, &card.to_card()?, &options.to_options()?)
                .await?
        }
        Operation::Purchase {
            amount,
            card,
            options,
        } => {
            gateway
                .purchase(Money::new(amount)?, &card.to_card()?, &options.to_options()?)
                .await?
        }
        Operation::Capture {
            amount,
            transaction_id,
        } => gateway.capture(Money::new(amount)?, &transaction_id).await?,
        Operation::Void { transaction_id } => gateway.void(&transaction_id).await?,
        Operation::Refund {
            amount,
            transaction_id,
        } => gateway.refund(Money::new(amount)?, &transaction_id).await?,
        Operation::Verify { card, options } => {
            gateway
                .verify(&card.to_card()?, &options.to_options()?)
                .await?
        }
    };

    debug!(
        success = response.success,
        authorization = ?response.authorization,
        "Operation finished"
    );
    println!("{}", serde_json::to_string_pretty(&response)?);

    if !response.is_success() {
        std::process::exit(1);
    }
    Ok(())
}

use anyhow::{Context, anyhow};
use clap::Args;
use helpme_core::catalog::CatalogSource;
use helpme_core::discovery::Discovery;
use helpme_core::entities::{Booking, Provider, ServicePackage};
use helpme_core::payment::{
    FlowSettings, PaymentFlowController, PaymentFlowError, PaymentPoller, PixCharge, PixGateway,
    PollOutcome, VerifyOutcome,
};
use helpme_sdk::config::PaymentConfig;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::watch;

#[derive(Args, Debug)]
pub struct CheckoutArgs {
    /// Service package id, e.g. `s1`
    pub service: String,

    /// Provider id; defaults to the best-rated provider for the service
    #[arg(long)]
    pub provider: Option<String>,

    /// Verify in the background instead of waiting for confirmation
    #[arg(long)]
    pub poll: bool,

    /// Notes for the provider
    #[arg(long)]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Settlement {
    Paid,
    Unpaid,
}

pub async fn run<C: CatalogSource>(
    discovery: &Discovery<C>,
    config: &PaymentConfig,
    args: &CheckoutArgs,
    mut shutdown_rx: watch::Receiver<bool>,
) -> anyhow::Result<()> {
    let catalog = discovery.catalog();
    let service = catalog
        .service(&args.service)
        .ok_or_else(|| anyhow!("unknown service package: {}", args.service))?;
    let provider = pick_provider(discovery, service, args.provider.as_deref())?;

    let mut booking = Booking::new(
        provider,
        service,
        time::OffsetDateTime::now_utc(),
        args.notes.clone(),
    );
    tracing::info!(
        booking_id = %booking.id,
        provider = %provider.id,
        service = %service.id,
        "Booking created"
    );

    let gateway = PixGateway::from_config(config).context("failed to build payment client")?;
    let controller = Arc::new(PaymentFlowController::new(
        Arc::new(gateway),
        FlowSettings::from(config),
    ));

    let Some(charge) =
        create_charge(&controller, &mut booking, service, &mut shutdown_rx).await?
    else {
        println!("Checkout cancelled, no payment was recorded.");
        return Ok(());
    };
    print_charge(&charge, provider);

    let settlement = if args.poll || config.polling.enabled {
        poll(controller.clone(), config, shutdown_rx).await
    } else {
        confirm_manually(&controller, shutdown_rx).await?
    };

    match settlement {
        Settlement::Paid => {
            booking.activate();
            println!(
                "Payment confirmed. {} is on the way (booking {}).",
                provider.name, booking.id
            );
        }
        Settlement::Unpaid => {
            booking.cancel();
            controller.reset();
            println!("Checkout cancelled, no payment was recorded.");
        }
    }

    tracing::debug!(booking_id = %booking.id, status = ?booking.status, "Checkout finished");
    Ok(())
}

fn pick_provider<'a, C: CatalogSource>(
    discovery: &'a Discovery<C>,
    service: &ServicePackage,
    requested: Option<&str>,
) -> anyhow::Result<&'a Provider> {
    match requested {
        Some(id) => {
            let provider = discovery
                .catalog()
                .provider(id)
                .ok_or_else(|| anyhow!("unknown provider: {id}"))?;
            if !provider.offers(service.category) {
                return Err(anyhow!(
                    "{} does not offer {} services",
                    provider.name,
                    service.category
                ));
            }
            Ok(provider)
        }
        None => discovery
            .best_provider_for(service.category)
            .ok_or_else(|| anyhow!("no provider offers {} services", service.category)),
    }
}

/// Create the charge for `booking`, giving up early on shutdown. `None`
/// means shutdown won the race and the flow was reset.
async fn create_charge(
    controller: &PaymentFlowController,
    booking: &mut Booking,
    service: &ServicePackage,
    shutdown_rx: &mut watch::Receiver<bool>,
) -> anyhow::Result<Option<Arc<PixCharge>>> {
    let creation = controller.start_checkout(service.price, &service.name);
    tokio::pin!(creation);

    let result = loop {
        tokio::select! {
            biased;

            changed = shutdown_rx.changed() => {
                if changed.is_err() || *shutdown_rx.borrow() {
                    tracing::info!(booking_id = %booking.id, "Shutdown during charge creation");
                    controller.reset();
                    booking.cancel();
                    return Ok(None);
                }
            }

            result = &mut creation => break result,
        }
    };

    match result {
        Ok(charge) => Ok(Some(charge)),
        Err(e) => {
            tracing::error!(booking_id = %booking.id, error = %e, "Failed to create PIX charge");
            booking.cancel();
            Err(e.into())
        }
    }
}

fn expiry_label(secs: u32) -> String {
    match secs {
        1 => "1 second".to_string(),
        0..60 => format!("{secs} seconds"),
        _ => match secs.div_ceil(60) {
            1 => "1 minute".to_string(),
            minutes => format!("{minutes} minutes"),
        },
    }
}

fn print_charge(charge: &PixCharge, provider: &Provider) {
    println!("{} with {}: R$ {}", charge.description, provider.name, charge.amount);
    println!("PIX copia e cola:\n  {}", charge.copy_paste_code);
    println!("QR code: {}", charge.qr_code_image);
    println!(
        "Expires in {} (transaction {}).",
        expiry_label(charge.expires_in_secs),
        charge.transaction_id
    );
}

async fn poll(
    controller: Arc<PaymentFlowController>,
    config: &PaymentConfig,
    shutdown_rx: watch::Receiver<bool>,
) -> Settlement {
    println!("Waiting for payment...");
    match PaymentPoller::new(controller, config.polling.clone())
        .run(shutdown_rx)
        .await
    {
        PollOutcome::Confirmed => Settlement::Paid,
        PollOutcome::Expired => {
            println!("The charge expired before it was paid.");
            Settlement::Unpaid
        }
        PollOutcome::AttemptsExhausted => {
            println!("No payment seen yet. If you already paid, contact support.");
            Settlement::Unpaid
        }
        PollOutcome::Superseded | PollOutcome::Shutdown => Settlement::Unpaid,
    }
}

async fn confirm_manually(
    controller: &PaymentFlowController,
    mut shutdown_rx: watch::Receiver<bool>,
) -> anyhow::Result<Settlement> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        println!("Press Enter once you have paid, or type q to cancel.");
        let line = tokio::select! {
            biased;

            changed = shutdown_rx.changed() => {
                if changed.is_err() || *shutdown_rx.borrow() {
                    return Ok(Settlement::Unpaid);
                }
                continue;
            }

            line = lines.next_line() => line?,
        };

        match line {
            None => return Ok(Settlement::Unpaid),
            Some(input) if input.trim().eq_ignore_ascii_case("q") => {
                return Ok(Settlement::Unpaid);
            }
            Some(_) => {}
        }

        match controller.verify_payment().await {
            Ok(VerifyOutcome::Confirmed { .. }) => return Ok(Settlement::Paid),
            Ok(VerifyOutcome::Pending) => println!("Payment not received yet."),
            Ok(VerifyOutcome::Expired) => {
                println!("The charge expired. Run checkout again for a new one.");
                return Ok(Settlement::Unpaid);
            }
            Ok(VerifyOutcome::AlreadyInProgress) => {}
            Err(PaymentFlowError::VerificationFailed(e)) => {
                println!("Could not reach the payment service ({e}). Try again in a moment.");
            }
            Err(e) => return Err(e.into()),
        }
    }
}

// Copyright 2025 Bitgap Labs
// Licensed under the Apache License, Version 2.0

use bitgap_config::BitgapConfig;
use bitgap_core::backend::{BackendConfig, MockBackend};
use bitgap_core::codec;
use bitgap_core::distance::hamming_distance;
use bitgap_core::lifecycle::{ProofLifecycleOrchestrator, Verdict, VerificationCoordinator};
use bitgap_core::session::ProofSession;
use bitgap_core::store::RocksStore;
use log::info;
use std::sync::Arc;
use std::time::Duration;
use std::{env, process};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        print_usage();
        return Ok(());
    }

    match args[1].as_str() {
        "prove" => {
            if args.len() < 4 {
                println!("Usage: prove <a> <b>");
                println!("  a, b - binary strings of up to 8 digits ('0'/'1')");
                return Ok(());
            }
            prove(&args[2], &args[3]).await;
        }
        "verify" => {
            if args.len() < 3 {
                println!("Usage: verify <distance>");
                println!("  distance - claimed hamming distance, 0 to 8");
                return Ok(());
            }
            verify(&args[2]).await;
        }
        "distance" => {
            if args.len() < 4 {
                println!("Usage: distance <a> <b>");
                return Ok(());
            }
            distance(&args[2], &args[3]);
        }
        "help" | "--help" | "-h" => {
            print_usage();
        }
        cmd => {
            println!("❌ Unknown command: {}", cmd);
            println!();
            print_usage();
        }
    }

    Ok(())
}

async fn prove(raw_a: &str, raw_b: &str) {
    let session = match open_session().await {
        Ok(session) => session,
        Err(e) => {
            eprintln!("❌ Failed to open proof session: {}", e);
            process::exit(1);
        }
    };

    let mut orchestrator = ProofLifecycleOrchestrator::new(session);
    match orchestrator.generate_and_persist(raw_a, raw_b).await {
        Ok(receipt) => {
            println!(
                "✅ Setup params ({} bytes) and proof ({} bytes) saved.",
                receipt.params_len, receipt.proof_len
            );
            println!(
                "Hamming distance: {} (remember this number for the verify step)",
                receipt.distance
            );
        }
        Err(e) => {
            eprintln!("❌ Proof generation failed: {}", e);
            process::exit(1);
        }
    }
}

async fn verify(raw_claim: &str) {
    let session = match open_session().await {
        Ok(session) => session,
        Err(e) => {
            eprintln!("❌ Failed to open proof session: {}", e);
            process::exit(1);
        }
    };

    let coordinator = VerificationCoordinator::new(session);
    match coordinator.verify_raw(raw_claim).await {
        Ok(Verdict::Verified) => {
            println!("✅ Proof verified successfully!");
        }
        Ok(Verdict::Rejected) => {
            println!(
                "❌ Proof with hamming distance of {} failed to verify",
                raw_claim
            );
            process::exit(1);
        }
        Err(e) => {
            eprintln!("❌ Verification error: {}", e);
            process::exit(1);
        }
    }
}

fn distance(raw_a: &str, raw_b: &str) {
    let (a, b) = match (codec::encode(raw_a), codec::encode(raw_b)) {
        (Ok(a), Ok(b)) => (a, b),
        (Err(e), _) | (_, Err(e)) => {
            eprintln!("❌ Invalid input: {}", e);
            process::exit(1);
        }
    };

    println!("Hamming distance: {}", hamming_distance(&a, &b));
}

async fn open_session() -> anyhow::Result<ProofSession> {
    let config = BitgapConfig::load()?;

    info!("Opening artifact store at {}", config.store.path);
    let store = RocksStore::open(&config.store.path)?;

    let backend_config = BackendConfig {
        call_timeout: Duration::from_secs(config.backend.call_timeout_secs),
    };

    let session = ProofSession::open(Arc::new(store), MockBackend::new(), backend_config).await?;
    Ok(session)
}

fn print_usage() {
    println!("Bitgap - zero-knowledge hamming distance proofs");
    println!();
    println!("Usage: bitgap-core <command> [args]");
    println!();
    println!("Commands:");
    println!("  prove <a> <b>       Generate and save a proof for two binary inputs");
    println!("  verify <distance>   Verify the saved proof against a claimed distance");
    println!("  distance <a> <b>    Compute the hamming distance locally (no proof)");
    println!("  help                Show this help");
    println!();
    println!("Inputs are strings of up to 8 binary digits; shorter inputs are");
    println!("left-padded with zeros.");
}

//! Leakage Command
//!
//! TVLA-style fixed-vs-random t-test over simulated lane Hamming weights.

use anyhow::Result;
use clap::ValueEnum;
use keccak_dom::leakage::{assess, LeakageConfig, Probe};
use keccak_dom::Width;

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum, Debug)]
pub enum ProbeArg {
    /// Share 0 of the masked engine
    Share0,
    /// Share 1 of the masked engine
    Share1,
    /// Recombined masked state (positive control)
    Combined,
    /// Unmasked reference state (positive control)
    Unmasked,
}

impl From<ProbeArg> for Probe {
    fn from(probe: ProbeArg) -> Self {
        match probe {
            ProbeArg::Share0 => Self::Share0,
            ProbeArg::Share1 => Self::Share1,
            ProbeArg::Combined => Self::Combined,
            ProbeArg::Unmasked => Self::Unmasked,
        }
    }
}

/// Run the t-test for every requested probe; fail if any of them leaks.
pub fn leakage_mode(
    width: usize,
    rounds: usize,
    traces: usize,
    seed: u64,
    threshold: f64,
    probes: &[ProbeArg],
) -> Result<()> {
    let config = LeakageConfig {
        width: Width::new(width)?,
        rounds,
        traces,
        seed,
        threshold,
        ..LeakageConfig::default()
    };
    let probes = if probes.is_empty() {
        &[ProbeArg::Share0, ProbeArg::Share1][..]
    } else {
        probes
    };

    println!(
        "{}, {} round(s), {} traces, |t| threshold {}",
        config.width, config.rounds, config.traces, config.threshold
    );

    let mut leaking = Vec::new();
    for &probe in probes {
        let report = assess(&config, probe.into())?;
        let (tick, x, y) = report.worst_location();
        let verdict = if report.leaks() { "LEAKS" } else { "ok" };
        println!(
            "{probe:?}: max |t| = {:.2} at tick {tick}, lane ({x}, {y}); {} of {} points above threshold: {verdict}",
            report.max_abs_t,
            report.leaking_points(),
            report.t_values.len(),
        );
        if report.leaks() {
            leaking.push(probe);
        }
    }

    if !leaking.is_empty() {
        anyhow::bail!("First-order leakage detected for {leaking:?}");
    }

    Ok(())
}

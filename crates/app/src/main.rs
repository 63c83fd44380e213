//! Drives one PMSM channel through a voltage step and records the response.
//!
//! Usage: `pmsm-sim [run.json] [-v|-vv]`

mod plot;
mod run;

use std::env;
use std::fs::File;
use std::io::{BufWriter, Write};

use electrical::Pmsm;
use log::{LevelFilter, info, warn};
use simcore::{Component, DEFAULT_SUBSTEPS, SimContext};
use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};

use crate::run::RunConfig;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut config_path = None;
    let mut level = LevelFilter::Info;
    for arg in env::args().skip(1) {
        match arg.as_str() {
            "-v" => level = LevelFilter::Debug,
            "-vv" => level = LevelFilter::Trace,
            _ => config_path = Some(arg),
        }
    }
    TermLogger::init(level, Config::default(), TerminalMode::Stderr, ColorChoice::Auto)?;

    let config = match &config_path {
        Some(path) => RunConfig::load(path)?,
        None => RunConfig::default(),
    };
    config.params.validate()?;
    info!("running {:.3} s at period {} s", config.duration, config.period);

    let limit = config.params.clamped().max_stable_period(DEFAULT_SUBSTEPS);
    if config.period > limit {
        warn!("period {} s exceeds the stable limit of {limit:.6} s, expect divergence", config.period);
    }

    let mut model = Pmsm::new();
    model.initialize();

    let mut csv = BufWriter::new(File::create("pmsm_step.csv")?);
    writeln!(
        csv,
        "t,id,iq,induced_d,induced_q,psi_d,psi_q,torque,drop_d,drop_q"
    )?;

    let mut times = Vec::new();
    let mut id = Vec::new();
    let mut iq = Vec::new();
    let mut torque = Vec::new();

    let mut ctx = SimContext::new(config.period, 0.0);
    let mut last = None;
    while ctx.t <= config.duration {
        let input = config.input_at(ctx.t);
        let out = model.step(ctx, &config.params, &input);
        if !out.is_finite() {
            warn!("outputs diverged at t = {:.6} s, stopping", ctx.t);
            break;
        }

        writeln!(
            csv,
            "{:.6},{:.6},{:.6},{:.6},{:.6},{:.6},{:.6},{:.6},{:.6},{:.6}",
            ctx.t,
            out.id_estimate,
            out.iq_estimate,
            out.induced_d_term,
            out.induced_q_term,
            out.d_axis_flux,
            out.q_axis_flux,
            out.torque,
            out.d_axis_drop,
            out.q_axis_drop
        )?;
        times.push(ctx.t);
        id.push(out.id_estimate);
        iq.push(out.iq_estimate);
        torque.push(out.torque);

        last = Some(out);
        ctx = ctx.advance();
    }
    csv.flush()?;

    if let Some(out) = last {
        serde_json::to_writer_pretty(File::create("pmsm_final.json")?, &out)?;
        info!("final torque {:.6} Nm", out.torque);
    }

    plot::draw_series(
        "pmsm_step.png",
        "PMSM current step response",
        "Time [s]",
        "Current [A]",
        &times,
        &[("id", id.as_slice()), ("iq", iq.as_slice())],
    )?;
    plot::draw_series(
        "pmsm_torque.png",
        "PMSM torque",
        "Time [s]",
        "Torque [Nm]",
        &times,
        &[("torque", torque.as_slice())],
    )?;

    println!("Wrote pmsm_step.csv, pmsm_final.json, pmsm_step.png, pmsm_torque.png");
    Ok(())
}

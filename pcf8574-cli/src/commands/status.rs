//! Probe and status commands

use anyhow::Result;
use pcf8574::{Bus, Pcf8574};

use super::format_byte;

/// Check a device answers at the configured address
pub fn probe<B: Bus>(expander: &mut Pcf8574<B>) -> Result<()> {
    let address = expander.address();
    if expander.is_connected() {
        println!("PCF8574 found at 0x{:02X}", address);
        Ok(())
    } else {
        anyhow::bail!("No device responding at address 0x{:02X}", address);
    }
}

/// Read the port and display the driver state
///
/// The chip cannot report its latches, so the outputs are shown only when
/// this run wrote them (`outputs_known`).
pub fn status<B: Bus>(expander: &mut Pcf8574<B>, outputs_known: bool, json: bool) -> Result<()> {
    expander.read8()?;
    let state = expander.snapshot();
    let output = outputs_known.then_some(state.output);

    if json {
        let report = serde_json::json!({
            "address": state.address,
            "input": state.input,
            "output": output,
            "button_mask": state.button_mask,
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!();
    print_row("address", &format!("0x{:02X}", state.address));
    print_row("input", &format_byte(state.input));
    match output {
        Some(output) => print_row("output", &format_byte(output)),
        None => print_row("output", "unknown"),
    }
    print_row("button_mask", &format_byte(state.button_mask));
    print_row("pins", &pin_marks(state.input, output).join(" "));
    println!();
    println!("{}", legend(output.is_some()));

    Ok(())
}

/// Per-pin marks: `H` reads high, `L` reads low or is driven low, `ext` is
/// latched high but held low by something outside the chip
///
/// Without known outputs a low line cannot be attributed, so only `H` and
/// `L` appear.
fn pin_marks(input: u8, output: Option<u8>) -> Vec<String> {
    (0..8)
        .map(|pin| {
            let level = input & (1 << pin) != 0;
            let latched_high = output.map(|out| out & (1 << pin) != 0);
            let mark = match (latched_high, level) {
                (Some(false), _) => "L",
                (_, true) => "H",
                (Some(true), false) => "ext",
                (None, false) => "L",
            };
            format!("P{}:{}", pin, mark)
        })
        .collect()
}

fn legend(outputs_known: bool) -> &'static str {
    if outputs_known {
        "H = high, L = driven low, ext = released but pulled low externally"
    } else {
        "H = high, L = low (pass --init to tell outputs from external pulls)"
    }
}

/// Print a formatted table row
fn print_row(key: &str, value: &str) {
    println!("{:<16} {:>20}", key, value);
}

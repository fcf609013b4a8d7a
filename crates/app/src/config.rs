//! Configuration for the crc-sim application.
//!
//! Handles parsing command-line arguments and generating sensible defaults
//! (including a randomized frame that is reproducible with a seed).
//!
//! # Philosophy
//!
//! The tool should work with ZERO arguments, using intelligent defaults.
//! The seed is always printed with the configuration so runs are
//! reproducible.

use crate::input_gen::{append_crc_trailer, generate_sof_to_data, random_positions, MAX_DLC};
use crc_sim_core::layout::{CAN_CRC_FIELD_BITS, CAN_TRAILER_BITS};
use crc_sim_core::{AnalysisOptions, BitSeq, FrameLayout, Polynomial};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Where the injected error positions come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PositionSource {
    /// Every bit of the frame, in order
    All,

    /// Positions listed on the command line
    List,

    /// Positions drawn from the seeded RNG
    Random(usize),
}

/// Complete configuration for an analysis run.
#[derive(Debug, Clone)]
pub struct Config {
    // === Frame ===
    /// Frame under test
    pub frame: BitSeq,

    /// Whether the frame was generated from the seed
    pub frame_generated: bool,

    /// Random seed for generated frames and positions
    pub seed: u64,

    // === CRC ===
    /// Generator polynomial
    pub polynomial: Polynomial,

    /// Trailer layout and comparison width
    pub options: AnalysisOptions,

    // === Injection ===
    /// Positions to flip, in report order
    pub positions: Vec<usize>,

    /// How `positions` were chosen
    pub position_source: PositionSource,

    // === Behavior ===
    /// Whether to print the resolved configuration
    pub print_config: bool,

    /// Whether to highlight flipped bits with ANSI color
    pub color: bool,

    /// Whether to print the detection summary
    pub print_summary: bool,
}

impl Config {
    /// Parse configuration from command-line arguments.
    ///
    /// If no arguments are provided, generates a random SOF~Data frame using
    /// a time-based seed and sweeps every bit position.
    /// If --seed is provided, uses that seed for all randomness (fully deterministic).
    pub fn from_args(args: &[String]) -> Result<Self, String> {
        let mut frame: Option<BitSeq> = None;
        let mut polynomial: Option<Polynomial> = None;
        let mut positions: Option<Vec<usize>> = None;
        let mut random_errors: Option<usize> = None;
        let mut seed: Option<u64> = None;
        let mut dlc: Option<usize> = None;
        let mut width: Option<usize> = None;
        let mut threshold: Option<usize> = None;
        let mut raw = false;
        let mut received = false;
        let mut print_config = false;
        let mut color = true;
        let mut print_summary = true;

        let mut i = 0;
        while i < args.len() {
            match args[i].as_str() {
                "--frame" => {
                    i += 1;
                    if i >= args.len() {
                        return Err("--frame requires a bit string".to_string());
                    }
                    frame = Some(BitSeq::parse(&args[i]).map_err(|e| format!("--frame: {e}"))?);
                }
                "--poly" => {
                    i += 1;
                    if i >= args.len() {
                        return Err("--poly requires a bit string".to_string());
                    }
                    polynomial = Some(Polynomial::parse(&args[i]).map_err(|e| format!("--poly: {e}"))?);
                }
                "--positions" => {
                    i += 1;
                    if i >= args.len() {
                        return Err("--positions requires a list".to_string());
                    }
                    positions = Some(parse_positions(&args[i])?);
                }
                "--random-errors" => {
                    i += 1;
                    if i >= args.len() {
                        return Err("--random-errors requires a number".to_string());
                    }
                    random_errors = Some(args[i].parse().map_err(|_| "invalid random-errors")?);
                }
                "--seed" => {
                    i += 1;
                    if i >= args.len() {
                        return Err("--seed requires a number".to_string());
                    }
                    seed = Some(args[i].parse().map_err(|_| "invalid seed")?);
                }
                "--dlc" => {
                    i += 1;
                    if i >= args.len() {
                        return Err("--dlc requires a number".to_string());
                    }
                    let value: usize = args[i].parse().map_err(|_| "invalid dlc")?;
                    if value > MAX_DLC {
                        return Err(format!("--dlc must be 0-{MAX_DLC}"));
                    }
                    dlc = Some(value);
                }
                "--width" => {
                    i += 1;
                    if i >= args.len() {
                        return Err("--width requires a number".to_string());
                    }
                    width = Some(args[i].parse().map_err(|_| "invalid width")?);
                }
                "--threshold" => {
                    i += 1;
                    if i >= args.len() {
                        return Err("--threshold requires a number".to_string());
                    }
                    threshold = Some(args[i].parse().map_err(|_| "invalid threshold")?);
                }
                "--raw" => {
                    raw = true;
                }
                "--received" => {
                    received = true;
                }
                "--print-config" => {
                    print_config = true;
                }
                "--no-color" => {
                    color = false;
                }
                "--no-summary" => {
                    print_summary = false;
                }
                "--help" | "-h" => {
                    print_help();
                    std::process::exit(0);
                }
                _ => {
                    return Err(format!("unknown argument: {}", args[i]));
                }
            }
            i += 1;
        }

        if positions.is_some() && random_errors.is_some() {
            return Err("--positions and --random-errors are mutually exclusive".to_string());
        }
        if raw && threshold.is_some() {
            return Err("--raw and --threshold are mutually exclusive".to_string());
        }

        let layout = match threshold {
            _ if raw => FrameLayout::raw(),
            Some(bits) => {
                FrameLayout::new(bits, CAN_TRAILER_BITS, CAN_CRC_FIELD_BITS).map_err(|e| e.to_string())?
            }
            None => FrameLayout::can(),
        };
        let polynomial = polynomial.unwrap_or_else(Polynomial::can15);

        // Determine seed (explicit or time-based)
        let seed = seed.unwrap_or_else(|| {
            use std::time::{SystemTime, UNIX_EPOCH};
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|t| t.as_millis() as u64)
                .unwrap_or_default()
        });

        // Generate defaults using seed
        let mut rng = ChaCha8Rng::seed_from_u64(seed);

        let frame_generated = frame.is_none();
        let mut frame = match frame {
            Some(frame) => frame,
            None => {
                let dlc = dlc.unwrap_or_else(|| rng.gen_range(0..=MAX_DLC));
                generate_sof_to_data(&mut rng, dlc)
            }
        };
        if received {
            frame = append_crc_trailer(&frame, &polynomial, &layout).map_err(|e| format!("--received: {e}"))?;
        }
        if frame.is_empty() {
            return Err("--frame must contain at least one bit".to_string());
        }

        let (positions, position_source) = match (positions, random_errors) {
            (Some(list), _) => (list, PositionSource::List),
            (None, Some(count)) => (random_positions(&mut rng, frame.len(), count), PositionSource::Random(count)),
            (None, None) => ((0..frame.len()).collect(), PositionSource::All),
        };

        let config = Config {
            frame,
            frame_generated,
            seed,
            polynomial,
            options: AnalysisOptions {
                layout,
                width: width.unwrap_or(CAN_CRC_FIELD_BITS),
            },
            positions,
            position_source,
            print_config,
            color,
            print_summary,
        };

        Ok(config)
    }

    /// Print the configuration in human-readable form.
    pub fn print(&self) {
        let layout = &self.options.layout;

        println!("=== Configuration ===");
        println!("Seed: {}", self.seed);
        println!(
            "Frame: {} ({} bits{})",
            self.frame,
            self.frame.len(),
            if self.frame_generated { ", generated" } else { "" }
        );
        println!("Polynomial: {} (degree {})", self.polynomial, self.polynomial.degree());
        println!("Comparison width: {} bits", self.options.width);
        println!();
        println!("=== Frame Layout ===");
        if layout.strips_trailer() {
            println!(
                "Trailer stripping: frames over {} bits, {}-bit trailer, {}-bit CRC field",
                layout.threshold_bits(),
                layout.trailer_bits(),
                layout.crc_field_bits()
            );
            println!(
                "Applies to this frame: {}",
                if layout.applies_to(self.frame.len()) { "yes" } else { "no" }
            );
        } else {
            println!("Trailer stripping: disabled");
        }
        println!();
        println!("=== Error Injection ===");
        match self.position_source {
            PositionSource::All => println!("Positions: all {}", self.positions.len()),
            PositionSource::List => println!("Positions: {:?}", self.positions),
            PositionSource::Random(count) => println!("Positions: {} random {:?}", count, self.positions),
        }
        println!();
    }
}

/// Parse a comma-separated list of bit positions.
fn parse_positions(list: &str) -> Result<Vec<usize>, String> {
    list.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(|item| item.parse().map_err(|_| format!("invalid position: {item}")))
        .collect()
}

fn print_help() {
    println!("crc-sim: Single-bit error injection against a bit-level CRC");
    println!();
    println!("USAGE:");
    println!("    crc-sim [OPTIONS]");
    println!();
    println!("OPTIONS:");
    println!("    --frame <BITS>          Frame under test (default: generated SOF~Data)");
    println!("    --poly <BITS>           Generator polynomial (default: CAN CRC-15)");
    println!("    --seed <N>              Random seed for determinism");
    println!("    --dlc <0-8>             Data bytes in the generated frame (default: random)");
    println!("    --received              Append the CRC trailer to the frame");
    println!();
    println!("    --positions <LIST>      Comma-separated positions to flip (default: all)");
    println!("    --random-errors <N>     Flip N random positions instead");
    println!("    --width <N>             CRC comparison width (default: 15)");
    println!();
    println!("    --raw                   Never strip the CRC trailer");
    println!("    --threshold <N>         Strip the trailer of frames over N bits (default: 32)");
    println!();
    println!("    --print-config          Print resolved configuration");
    println!("    --no-color              Don't highlight flipped bits");
    println!("    --no-summary            Don't print the detection summary");
    println!("    --help, -h              Print this help");
    println!();
    println!("EXAMPLES:");
    println!("    crc-sim                                          # Random frame, all positions");
    println!("    crc-sim --seed 42 --received                     # Deterministic received frame");
    println!("    crc-sim --frame 1101011011 --poly 10011 --raw    # Textbook example");
    println!("    crc-sim --random-errors 10 --dlc 8               # Ten random flips, 8 data bytes");
    println!();
}

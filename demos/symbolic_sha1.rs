use clap::Parser;

use dnf_rs::bitvec::BitVector;
use dnf_rs::config::{FormulaConfig, Reduction};
use dnf_rs::engine::{to_hex, Sha1, SymbolicSha1};
use dnf_rs::value::BoolValue;

#[derive(Debug, Parser)]
#[command(author, version)]
struct Cli {
    /// Input message (bytes of the UTF-8 string).
    #[arg(value_name = "STRING", default_value = "")]
    message: String,

    /// Number of low bits of the first byte to replace with variables `x[i]`.
    #[clap(long, value_name = "INT", default_value = "0")]
    symbolic: usize,

    /// Only cancel contradictions, skip complement and absorption passes.
    #[clap(long)]
    fast: bool,

    /// Maximum AND cross-product size.
    #[clap(long, value_name = "INT")]
    max_product: Option<usize>,
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    simplelog::TermLogger::init(
        simplelog::LevelFilter::Info,
        simplelog::Config::default(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    )?;

    let time_total = std::time::Instant::now();

    let args = Cli::parse();
    println!("args = {:?}", args);

    let bytes = args.message.as_bytes();

    if args.symbolic == 0 {
        let mut engine = Sha1::new();
        engine.update(bytes)?;
        let digest = engine.terminate()?;
        println!("{}", to_hex(&digest));
        println!("Total time: {:?}", time_total.elapsed());
        return Ok(());
    }

    let symbolic = args.symbolic.min(8);
    let mut data: Vec<BitVector<8>> = bytes.iter().map(|&b| BitVector::from(b)).collect();
    if data.is_empty() {
        data.push(BitVector::zero());
    }
    for i in 0..symbolic {
        data[0].set(i, BoolValue::var("x", i as u32));
    }
    println!("first element = {}", data[0]);

    let reduction = if args.fast {
        Reduction::CancelOnly
    } else {
        Reduction::Full
    };
    let config = FormulaConfig::new(reduction, args.max_product);

    let words = config.scope(|| -> color_eyre::Result<[BitVector<32>; 5]> {
        let mut engine = SymbolicSha1::new();
        engine.update(&data)?;
        Ok(engine.terminate()?)
    })?;

    for (i, word) in words.iter().enumerate() {
        println!("h[{}] (size {}) = {}", i, word.size(), word);
    }

    println!("Total time: {:?}", time_total.elapsed());
    Ok(())
}

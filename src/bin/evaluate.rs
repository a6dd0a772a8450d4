
use axon::*;
use axon::logic::HashMode;
use axon::stats::BranchStats;
use axon::trace::{BranchPattern, SyntheticTrace};

const ADDR_BITS: usize = 8;

fn run_test(records: &[BranchRecord], p: &mut dyn BranchPredictor)
    -> Result<()>
{
    let mut stats = BranchStats::new();
    for record in records {
        let branch = BranchInstruction::from_pc(record.pc, ADDR_BITS);
        let predicted = p.predict(&branch)?;
        p.update(&branch, record.outcome)?;
        stats.record(record, predicted);
    }
    println!("[*] {:4} hit rate: {}/{} ({:.2}% correct) ({} misses)",
        p.name(),
        stats.global_hits(),
        stats.global_brns(),
        stats.hit_rate() * 100.0,
        stats.global_miss(),
    );
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();

    let trace = SyntheticTrace::generate(&[
        (0x40, BranchPattern::AlwaysTaken),
        (0x44, BranchPattern::NeverTaken),
        (0x48, BranchPattern::TakenPeriodic(3)),
        (0x4c, BranchPattern::TakenPeriodic(7)),
        (0x80, BranchPattern::Biased(0.9)),
        (0x84, BranchPattern::Biased(0.5)),
    ], 4096, 0x1234_5678);
    log::info!("evaluating {} records", trace.len());

    let mut predictors: Vec<Box<dyn BranchPredictor>> = vec![
        Box::new(GAgConfig {
            bhr_bits: 4, ctr_bits: 2,
        }.build()?),
        Box::new(GApConfig {
            bhr_bits: 4, ctr_bits: 2, addr_bits: ADDR_BITS,
        }.build()?),
        Box::new(PApConfig {
            bhr_bits: 4, ctr_bits: 2, addr_bits: ADDR_BITS,
        }.build()?),
        Box::new(SAgConfig {
            bhr_bits: 4, ctr_bits: 2, addr_bits: ADDR_BITS,
            set_bits: 4, hash_mode: HashMode::Xor,
        }.build()?),
        Box::new(SApConfig {
            bhr_bits: 4, ctr_bits: 2, addr_bits: ADDR_BITS,
            set_bits: 4, hash_mode: HashMode::Xor,
        }.build()?),
        Box::new(SAsConfig {
            bhr_bits: 4, ctr_bits: 2, addr_bits: ADDR_BITS,
            set_bits: 4, hash_mode: HashMode::Xor,
        }.build()?),
    ];

    for p in predictors.iter_mut() {
        run_test(trace.records(), p.as_mut())?;
    }
    Ok(())
}

use anyhow::Result;
use serde::Serialize;

pub use crate::output::types::Meta;
use crate::output::config::OutputConfig;
use crate::output::types::Envelope;
use crate::output::Emitter;

pub fn print_plan<T: Serialize>(op: &'static str, plan: &T, meta: Option<Meta>) -> Result<()> {
    let env = Envelope::plan(op, plan, meta)?;
    Emitter::new(OutputConfig::from_env()).emit(&env)?;
    Ok(())
}

pub fn print_result<T: Serialize>(op: &'static str, result: &T, meta: Option<Meta>) -> Result<()> {
    let env = Envelope::result(op, result, meta)?;
    Emitter::new(OutputConfig::from_env()).emit(&env)?;
    Ok(())
}

use advent::d17_lib::{
    minimal_heat_loss, parse_city, Crucible, REGULAR_CRUCIBLE, ULTRA_CRUCIBLE,
};
use advent::helpers;
use anyhow::{Context, Result};

fn least_heat_loss(s: &str, crucible: &Crucible) -> Result<u32> {
    let city = parse_city(s)?;
    minimal_heat_loss(&city, crucible).context("The crucible can't reach the factory")
}

fn solve_p1() -> Result<()> {
    let input = helpers::read_day_input("d17")?;
    let heat_loss = least_heat_loss(&input, &REGULAR_CRUCIBLE)?;
    println!("Least heat loss with a regular crucible: {}", heat_loss);
    Ok(())
}

fn solve_p2() -> Result<()> {
    let input = helpers::read_day_input("d17")?;
    let heat_loss = least_heat_loss(&input, &ULTRA_CRUCIBLE)?;
    println!("Least heat loss with an ultra crucible: {}", heat_loss);
    Ok(())
}

fn main() -> Result<()> {
    solve_p1()?;
    solve_p2()
}

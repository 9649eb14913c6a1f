//! Interactive catalog browser.
//!
//! Pick a dataset by name to see its parameters, then a parameter to see its
//! valid inputs. `b` goes back one level and `q` (or end of input) quits.

use bea::{Catalog, CatalogStore, Session};
use std::io::{self, BufRead, Write};

use crate::error::CliError;
use crate::render;

const QUIT: &str = "q";
const BACK: &str = "b";

pub(crate) async fn run<S: CatalogStore>(session: &Session<S>) -> Result<(), CliError> {
    let catalog = session.catalog().await?;
    tokio::task::spawn_blocking(move || browse(&catalog, io::stdin().lock(), io::stdout().lock()))
        .await?
}

pub(crate) fn browse<R: BufRead, W: Write>(
    catalog: &Catalog,
    mut input: R,
    mut out: W,
) -> Result<(), CliError> {
    'datasets: loop {
        writeln!(out, "{}", render::banner("Search Available Datasets"))?;
        writeln!(out, "{}", render::datasets_table(catalog))?;

        let Some(choice) = prompt(&mut input, &mut out, "Please choose a dataset (q to quit): ")?
        else {
            return Ok(());
        };
        if choice.eq_ignore_ascii_case(QUIT) {
            return Ok(());
        }
        let Some(dataset) = catalog.dataset(&choice) else {
            writeln!(out, "Invalid input. Please input a dataset name from the table.")?;
            writeln!(out, "Try again.")?;
            continue;
        };

        loop {
            writeln!(
                out,
                "{}",
                render::banner(&format!("{} Dataset Parameters", dataset.name))
            )?;
            writeln!(out, "{}", render::parameters_table(dataset))?;

            let Some(choice) = prompt(
                &mut input,
                &mut out,
                "Choose a parameter to see its valid inputs (b to go back, q to quit): ",
            )?
            else {
                return Ok(());
            };
            if choice.eq_ignore_ascii_case(QUIT) {
                return Ok(());
            }
            if choice.eq_ignore_ascii_case(BACK) {
                continue 'datasets;
            }

            let Some(parameter) = dataset.parameter(&choice) else {
                writeln!(out, "Invalid input. Please input a parameter name from the table.")?;
                writeln!(out, "Try again.")?;
                continue;
            };

            writeln!(
                out,
                "{}",
                render::banner(&format!("{} / {} Valid Inputs", dataset.name, parameter.name))
            )?;
            writeln!(out, "{}", render::valid_inputs_table(parameter))?;

            match prompt(&mut input, &mut out, "Press Enter to go back (q to quit): ")? {
                Some(choice) if !choice.eq_ignore_ascii_case(QUIT) => {}
                _ => return Ok(()),
            }
        }
    }
}

/// Writes `text` and reads one trimmed line; `None` at end of input.
fn prompt<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
    text: &str,
) -> Result<Option<String>, CliError> {
    write!(out, "{text}")?;
    out.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        writeln!(out)?;
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

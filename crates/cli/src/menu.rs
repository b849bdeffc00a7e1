use crate::config::Settings;
use crate::output;
use anyhow::{Context as AnyhowContext, Result};
use dialoguer::theme::ColorfulTheme;
use dialoguer::Select;
use mesh_doctor_analysis::{run_checks, Check, ResourceClient};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Entry {
    FullReport,
    Single(Check),
    Exit,
}

impl Entry {
    fn label(self) -> &'static str {
        match self {
            Entry::FullReport => "Full report",
            Entry::Single(check) => check.title(),
            Entry::Exit => "Exit",
        }
    }
}

fn entries() -> Vec<Entry> {
    std::iter::once(Entry::FullReport)
        .chain(Check::ALL.into_iter().map(Entry::Single))
        .chain(std::iter::once(Entry::Exit))
        .collect()
}

/// Prompts for a check until the user exits or cancels. A failing check is
/// reported and the menu comes back.
pub(crate) fn run(client: &dyn ResourceClient, settings: &Settings) -> Result<()> {
    let theme = ColorfulTheme::default();
    let entries = entries();
    let labels: Vec<&str> = entries.iter().map(|entry| entry.label()).collect();

    loop {
        let selection = Select::with_theme(&theme)
            .with_prompt("What would you like to check?")
            .items(&labels)
            .default(0)
            .interact_opt()
            .context("Interactive menu failed")?;

        let outcome = match selection.and_then(|idx| entries.get(idx).copied()) {
            None | Some(Entry::Exit) => return Ok(()),
            Some(Entry::FullReport) => {
                let results = run_checks(client, &Check::ALL, &settings.options);
                output::deliver(settings, &results)
            }
            Some(Entry::Single(check)) => check
                .run(client, &settings.options)
                .with_context(|| format!("{check} check failed"))
                .and_then(|result| output::deliver(settings, &[result])),
        };
        if let Err(err) = outcome {
            log::error!("{err:#}");
        }
        eprintln!("\n---\n");
    }
}

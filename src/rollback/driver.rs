// ABOUTME: Connects the rollback selector to the operator and the cloud.
// ABOUTME: Loads listings on demand and applies the confirmed plan.

use super::selector::{Effect, Input, Outcome, Plan, Selector};
use super::terminal::Prompter;
use crate::cloud::Cloud;
use crate::config::Config;
use crate::diagnostics::{Diagnostics, Warning};
use crate::error::Result;
use crate::output::Output;
use crate::release::{FunctionAliasManager, Release, VersionStore, list_deploy_versions};
use crate::stack::resolve_frontend_target;

/// Run one interactive rollback for `config.stage`.
///
/// The stage must be versioned. Listings are fetched only for the path the
/// operator picks; nothing is mutated until the operator confirms.
pub async fn run_rollback<C: Cloud, P: Prompter>(
    cloud: &C,
    config: &Config,
    prompter: &mut P,
    output: &Output,
    diag: &mut Diagnostics,
) -> Result<Outcome> {
    config.ensure_versioned_stage()?;

    let aliases = FunctionAliasManager::new(cloud.functions(), &config.stage);
    let mut selector = Selector::new();
    let mut input = Input::Start;

    loop {
        input = match selector.advance(input)? {
            Effect::Ask(prompt) => Input::Answer(prompter.ask(&prompt)?),

            Effect::LoadFrontendVersions => {
                prompter.say("\nFetching frontend info...")?;
                let target =
                    resolve_frontend_target(cloud.stacks(), &config.frontend_stack).await?;
                let current = VersionStore::new(cloud.parameters(), &target.version_parameter)
                    .read()
                    .await?;
                let listing = list_deploy_versions(cloud.objects(), &target.bucket).await?;
                for prefix in &listing.skipped {
                    diag.warn(Warning::skipped_prefix(prefix));
                }
                Input::FrontendVersions {
                    target,
                    versions: listing.versions,
                    current,
                }
            }

            Effect::LoadFunctions => {
                prompter.say("\nFetching functions...")?;
                Input::Functions(aliases.list_app_functions(&config.app).await?)
            }

            Effect::LoadFunctionVersions(function) => {
                prompter.say(&format!("\nFetching versions for {function}..."))?;
                Input::FunctionVersions(aliases.list_versions(&function).await?)
            }

            Effect::Apply(plan) => {
                apply(cloud, &aliases, plan, output).await?;
                Input::Applied
            }

            Effect::Finish(outcome) => return Ok(outcome),
        };
    }
}

async fn apply<C: Cloud>(
    cloud: &C,
    aliases: &FunctionAliasManager<'_, C::Functions>,
    plan: Plan,
    output: &Output,
) -> Result<()> {
    match plan {
        Plan::Frontend {
            target,
            version,
            current,
        } => {
            let release = Release::restore(target, version, current);

            output.progress("  → Switching CDN origin...");
            let release = release.switch_origin(cloud.cdn()).await?;

            output.progress("  → Invalidating cache...");
            let release = release.invalidate(cloud.cdn()).await?;

            output.progress("  → Recording version...");
            release.commit(cloud.parameters()).await?.finish();
        }
        Plan::Function { function, version } => {
            output.progress("  → Updating alias...");
            aliases.repoint_alias(&function, version).await?;
        }
    }
    Ok(())
}

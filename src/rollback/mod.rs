// ABOUTME: Operator-driven rollback of the frontend or a single function.
// ABOUTME: A pure selector decides; the driver performs loads and the final mutation.

mod driver;
mod selector;
mod terminal;

pub use driver::run_rollback;
pub use selector::{
    Effect, FrontendCandidate, Input, MenuOption, Outcome, Plan, Prompt, PromptKind, Selector,
    SelectorError,
};
pub use terminal::{PromptError, Prompter, TerminalPrompter};

// ABOUTME: Interactive rollback decision procedure as a pure state machine.
// ABOUTME: Consumes operator answers and loaded listings; yields prompts, loads, and plans.

use crate::release::{FrontendTarget, FunctionCandidate};
use crate::types::{DeployVersion, FunctionName, FunctionVersion};
use nonempty::NonEmpty;
use std::fmt;

/// Something the selector needs done before it can continue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Show a prompt and feed back the operator's line as `Input::Answer`.
    Ask(Prompt),
    /// Feed back `Input::FrontendVersions`.
    LoadFrontendVersions,
    /// Feed back `Input::Functions`.
    LoadFunctions,
    /// Feed back `Input::FunctionVersions` for this function.
    LoadFunctionVersions(FunctionName),
    /// Perform the rollback, then feed back `Input::Applied`.
    Apply(Plan),
    /// Terminal; no further input is accepted.
    Finish(Outcome),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Start,
    Answer(String),
    FrontendVersions {
        target: FrontendTarget,
        /// Versions present in storage, highest first.
        versions: Vec<DeployVersion>,
        /// Value of the version pointer.
        current: Option<DeployVersion>,
    },
    Functions(Vec<FunctionName>),
    /// Published versions, highest first, current one marked.
    FunctionVersions(Vec<FunctionCandidate>),
    Applied,
}

impl Input {
    fn name(&self) -> &'static str {
        match self {
            Input::Start => "start",
            Input::Answer(_) => "answer",
            Input::FrontendVersions { .. } => "frontend versions",
            Input::Functions(_) => "functions",
            Input::FunctionVersions(_) => "function versions",
            Input::Applied => "applied",
        }
    }
}

/// The mutation a confirmed rollback performs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Plan {
    Frontend {
        target: FrontendTarget,
        version: DeployVersion,
        current: Option<DeployVersion>,
    },
    Function {
        function: FunctionName,
        version: FunctionVersion,
    },
}

impl fmt::Display for Plan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Plan::Frontend { version, .. } => write!(f, "frontend to {version}"),
            Plan::Function { function, version } => write!(f, "{function} to {version}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    RolledBack(Plan),
    /// The chosen version is already active; nothing was changed.
    AlreadyCurrent,
    /// The operator declined the confirmation.
    Cancelled,
    /// There was nothing to choose from.
    NothingToRollBack(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptKind {
    /// Numbered menu; valid answers are `1..=len`.
    Menu { len: usize },
    /// `y`/`Y` confirms, anything else declines.
    Confirm,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuOption {
    pub label: String,
    /// Second line shown under the label.
    pub detail: Option<String>,
}

impl MenuOption {
    fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            detail: None,
        }
    }
}

/// One question for the operator. Rendering is left to the adapter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    pub heading: Option<String>,
    pub options: Vec<MenuOption>,
    pub question: String,
    /// Set when re-asking after an invalid answer.
    pub notice: Option<String>,
    pub kind: PromptKind,
}

impl Prompt {
    fn menu(heading: &str, options: Vec<MenuOption>) -> Self {
        let len = options.len();
        Prompt {
            heading: Some(heading.to_string()),
            options,
            question: format!("Select (1-{len}): "),
            notice: None,
            kind: PromptKind::Menu { len },
        }
    }

    fn confirm(question: String) -> Self {
        Prompt {
            heading: None,
            options: Vec::new(),
            question,
            notice: None,
            kind: PromptKind::Confirm,
        }
    }

    fn with_notice(mut self, notice: String) -> Self {
        self.notice = Some(notice);
        self
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SelectorError {
    #[error("rollback selector received {input} while {state}")]
    UnexpectedInput {
        state: &'static str,
        input: &'static str,
    },
}

/// A frontend version offered for rollback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrontendCandidate {
    pub version: DeployVersion,
    pub is_current: bool,
}

#[derive(Debug)]
enum State {
    Start,
    ChooseTarget,
    LoadingFrontend,
    ChooseFrontendVersion {
        target: FrontendTarget,
        candidates: NonEmpty<FrontendCandidate>,
        current: Option<DeployVersion>,
    },
    ConfirmFrontend {
        target: FrontendTarget,
        version: DeployVersion,
        current: Option<DeployVersion>,
    },
    LoadingFunctions,
    ChooseFunction {
        functions: NonEmpty<FunctionName>,
    },
    LoadingFunctionVersions {
        function: FunctionName,
    },
    ChooseFunctionVersion {
        function: FunctionName,
        candidates: NonEmpty<FunctionCandidate>,
    },
    ConfirmFunction {
        function: FunctionName,
        version: FunctionVersion,
    },
    Applying(Plan),
    Done,
}

impl State {
    fn name(&self) -> &'static str {
        match self {
            State::Start => "not started",
            State::ChooseTarget => "choosing a target",
            State::LoadingFrontend => "loading frontend versions",
            State::ChooseFrontendVersion { .. } => "choosing a frontend version",
            State::ConfirmFrontend { .. } => "confirming a frontend rollback",
            State::LoadingFunctions => "loading functions",
            State::ChooseFunction { .. } => "choosing a function",
            State::LoadingFunctionVersions { .. } => "loading function versions",
            State::ChooseFunctionVersion { .. } => "choosing a function version",
            State::ConfirmFunction { .. } => "confirming a function rollback",
            State::Applying(_) => "applying",
            State::Done => "finished",
        }
    }
}

const TARGETS: [&str; 2] = ["Frontend (CloudFront/S3)", "Lambda function"];

/// Drives one rollback conversation.
///
/// Call `advance(Input::Start)` first, then answer each `Effect` with the
/// matching `Input` until `Effect::Finish`. Invalid menu answers re-ask the
/// same prompt; they never end the run.
#[derive(Debug)]
pub struct Selector {
    state: State,
}

impl Default for Selector {
    fn default() -> Self {
        Self::new()
    }
}

impl Selector {
    pub fn new() -> Self {
        Self {
            state: State::Start,
        }
    }

    pub fn is_finished(&self) -> bool {
        matches!(self.state, State::Done)
    }

    pub fn advance(&mut self, input: Input) -> Result<Effect, SelectorError> {
        let state = std::mem::replace(&mut self.state, State::Done);
        let (next, effect) = match (state, input) {
            (State::Start, Input::Start) => (State::ChooseTarget, Effect::Ask(target_prompt())),

            (State::ChooseTarget, Input::Answer(answer)) => {
                match parse_choice(&answer, TARGETS.len()) {
                    Some(0) => (State::LoadingFrontend, Effect::LoadFrontendVersions),
                    Some(_) => (State::LoadingFunctions, Effect::LoadFunctions),
                    None => (
                        State::ChooseTarget,
                        Effect::Ask(target_prompt().with_notice(invalid(&answer))),
                    ),
                }
            }

            // Frontend path
            (State::LoadingFrontend, Input::FrontendVersions { target, versions, current }) => {
                let candidates = versions
                    .into_iter()
                    .map(|version| FrontendCandidate {
                        version,
                        is_current: Some(version) == current,
                    })
                    .collect();
                match NonEmpty::from_vec(candidates) {
                    Some(candidates) => {
                        let prompt = frontend_versions_prompt(&candidates);
                        (
                            State::ChooseFrontendVersion {
                                target,
                                candidates,
                                current,
                            },
                            Effect::Ask(prompt),
                        )
                    }
                    None => finish(Outcome::NothingToRollBack(
                        "No frontend versions found.".to_string(),
                    )),
                }
            }

            (
                State::ChooseFrontendVersion {
                    target,
                    candidates,
                    current,
                },
                Input::Answer(answer),
            ) => {
                match parse_choice(&answer, candidates.len()).and_then(|i| candidates.get(i)) {
                    Some(chosen) if chosen.is_current => finish(Outcome::AlreadyCurrent),
                    Some(chosen) => {
                        let version = chosen.version;
                        (
                            State::ConfirmFrontend {
                                target,
                                version,
                                current,
                            },
                            Effect::Ask(Prompt::confirm(format!(
                                "Roll back frontend to {version}? (y/n): "
                            ))),
                        )
                    }
                    None => {
                        let prompt =
                            frontend_versions_prompt(&candidates).with_notice(invalid(&answer));
                        (
                            State::ChooseFrontendVersion {
                                target,
                                candidates,
                                current,
                            },
                            Effect::Ask(prompt),
                        )
                    }
                }
            }

            (
                State::ConfirmFrontend {
                    target,
                    version,
                    current,
                },
                Input::Answer(answer),
            ) => {
                if is_yes(&answer) {
                    let plan = Plan::Frontend {
                        target,
                        version,
                        current,
                    };
                    (State::Applying(plan.clone()), Effect::Apply(plan))
                } else {
                    finish(Outcome::Cancelled)
                }
            }

            // Function path
            (State::LoadingFunctions, Input::Functions(functions)) => {
                match NonEmpty::from_vec(functions) {
                    Some(functions) => {
                        let prompt = functions_prompt(&functions);
                        (State::ChooseFunction { functions }, Effect::Ask(prompt))
                    }
                    None => finish(Outcome::NothingToRollBack(
                        "No functions found for this app and stage.".to_string(),
                    )),
                }
            }

            (State::ChooseFunction { functions }, Input::Answer(answer)) => {
                match parse_choice(&answer, functions.len()).and_then(|i| functions.get(i)) {
                    Some(function) => {
                        let function = function.clone();
                        (
                            State::LoadingFunctionVersions {
                                function: function.clone(),
                            },
                            Effect::LoadFunctionVersions(function),
                        )
                    }
                    None => {
                        let prompt = functions_prompt(&functions).with_notice(invalid(&answer));
                        (State::ChooseFunction { functions }, Effect::Ask(prompt))
                    }
                }
            }

            (State::LoadingFunctionVersions { function }, Input::FunctionVersions(versions)) => {
                match NonEmpty::from_vec(versions) {
                    Some(candidates) => {
                        let prompt = function_versions_prompt(&candidates);
                        (
                            State::ChooseFunctionVersion {
                                function,
                                candidates,
                            },
                            Effect::Ask(prompt),
                        )
                    }
                    None => finish(Outcome::NothingToRollBack(format!(
                        "No published versions of {function} (only $LATEST exists)."
                    ))),
                }
            }

            (State::ChooseFunctionVersion { function, candidates }, Input::Answer(answer)) => {
                match parse_choice(&answer, candidates.len()).and_then(|i| candidates.get(i)) {
                    Some(chosen) if chosen.is_current => finish(Outcome::AlreadyCurrent),
                    Some(chosen) => {
                        let version = chosen.version.version;
                        let prompt =
                            Prompt::confirm(format!("Roll back {function} to {version}? (y/n): "));
                        (
                            State::ConfirmFunction { function, version },
                            Effect::Ask(prompt),
                        )
                    }
                    None => {
                        let prompt =
                            function_versions_prompt(&candidates).with_notice(invalid(&answer));
                        (
                            State::ChooseFunctionVersion {
                                function,
                                candidates,
                            },
                            Effect::Ask(prompt),
                        )
                    }
                }
            }

            (State::ConfirmFunction { function, version }, Input::Answer(answer)) => {
                if is_yes(&answer) {
                    let plan = Plan::Function { function, version };
                    (State::Applying(plan.clone()), Effect::Apply(plan))
                } else {
                    finish(Outcome::Cancelled)
                }
            }

            (State::Applying(plan), Input::Applied) => finish(Outcome::RolledBack(plan)),

            (state, input) => {
                let err = SelectorError::UnexpectedInput {
                    state: state.name(),
                    input: input.name(),
                };
                self.state = state;
                return Err(err);
            }
        };

        self.state = next;
        Ok(effect)
    }
}

fn finish(outcome: Outcome) -> (State, Effect) {
    (State::Done, Effect::Finish(outcome))
}

/// Index for a 1-based menu answer, if it is in range.
fn parse_choice(answer: &str, len: usize) -> Option<usize> {
    match answer.trim().parse::<usize>() {
        Ok(n) if (1..=len).contains(&n) => Some(n - 1),
        _ => None,
    }
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim(), "y" | "Y")
}

fn invalid(answer: &str) -> String {
    format!("Invalid selection: {:?}", answer.trim())
}

fn current_suffix(is_current: bool) -> &'static str {
    if is_current { " (current)" } else { "" }
}

fn target_prompt() -> Prompt {
    Prompt::menu(
        "What do you want to roll back?",
        TARGETS.iter().map(|t| MenuOption::new(*t)).collect(),
    )
}

fn frontend_versions_prompt(candidates: &NonEmpty<FrontendCandidate>) -> Prompt {
    Prompt::menu(
        "Available frontend versions:",
        candidates
            .iter()
            .map(|c| MenuOption::new(format!("{}{}", c.version, current_suffix(c.is_current))))
            .collect(),
    )
}

fn functions_prompt(functions: &NonEmpty<FunctionName>) -> Prompt {
    Prompt::menu(
        "Available functions:",
        functions.iter().map(|f| MenuOption::new(f.as_str())).collect(),
    )
}

fn function_versions_prompt(candidates: &NonEmpty<FunctionCandidate>) -> Prompt {
    Prompt::menu(
        "Available versions:",
        candidates
            .iter()
            .map(|c| {
                let mut label = format!("{}{}", c.version.version, current_suffix(c.is_current));
                if let Some(modified) = c.version.last_modified {
                    label.push_str(&format!(" - {}", modified.format("%Y-%m-%d %H:%M:%S UTC")));
                }
                MenuOption {
                    label,
                    detail: Some(c.version.description.clone()).filter(|d| !d.is_empty()),
                }
            })
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cloud::PublishedVersion;
    use crate::types::{BucketName, DistributionId, ParameterName};

    fn v(n: u64) -> DeployVersion {
        DeployVersion::new(n).unwrap()
    }

    fn answer(s: &str) -> Input {
        Input::Answer(s.to_string())
    }

    fn target() -> FrontendTarget {
        FrontendTarget {
            bucket: BucketName::new("shop-frontend-prod"),
            distribution: DistributionId::new("E2QWRUHAPOMQZL"),
            version_parameter: ParameterName::new("/shop/prod/frontend-version"),
            url: None,
        }
    }

    fn function_candidate(n: u64, is_current: bool) -> FunctionCandidate {
        FunctionCandidate {
            version: PublishedVersion {
                version: FunctionVersion::Published(n),
                description: String::new(),
                last_modified: None,
            },
            is_current,
        }
    }

    fn started() -> Selector {
        let mut selector = Selector::new();
        let effect = selector.advance(Input::Start).unwrap();
        assert!(matches!(effect, Effect::Ask(Prompt { kind: PromptKind::Menu { len: 2 }, .. })));
        selector
    }

    fn at_frontend_menu(versions: &[u64], current: Option<u64>) -> Selector {
        let mut selector = started();
        assert_eq!(selector.advance(answer("1")).unwrap(), Effect::LoadFrontendVersions);
        selector
            .advance(Input::FrontendVersions {
                target: target(),
                versions: versions.iter().map(|&n| v(n)).collect(),
                current: current.map(v),
            })
            .unwrap();
        selector
    }

    #[test]
    fn target_menu_reprompts_on_out_of_range() {
        let mut selector = started();
        match selector.advance(answer("3")).unwrap() {
            Effect::Ask(prompt) => {
                assert_eq!(prompt.question, "Select (1-2): ");
                assert!(prompt.notice.is_some());
            }
            other => panic!("expected re-prompt, got {other:?}"),
        }
        assert_eq!(selector.advance(answer("2")).unwrap(), Effect::LoadFunctions);
    }

    #[test]
    fn frontend_menu_marks_current() {
        let mut selector = started();
        selector.advance(answer("1")).unwrap();
        let effect = selector
            .advance(Input::FrontendVersions {
                target: target(),
                versions: vec![v(7), v(6), v(5)],
                current: Some(v(7)),
            })
            .unwrap();

        match effect {
            Effect::Ask(prompt) => {
                let labels: Vec<_> = prompt.options.iter().map(|o| o.label.as_str()).collect();
                assert_eq!(labels, vec!["v7 (current)", "v6", "v5"]);
                assert_eq!(prompt.question, "Select (1-3): ");
            }
            other => panic!("expected menu, got {other:?}"),
        }
    }

    #[test]
    fn choosing_current_frontend_version_is_a_no_op() {
        let mut selector = at_frontend_menu(&[7, 6], Some(7));
        assert_eq!(
            selector.advance(answer("1")).unwrap(),
            Effect::Finish(Outcome::AlreadyCurrent)
        );
        assert!(selector.is_finished());
    }

    #[test]
    fn confirmed_frontend_rollback_applies_plan() {
        let mut selector = at_frontend_menu(&[7, 6, 5], Some(7));

        match selector.advance(answer("3")).unwrap() {
            Effect::Ask(prompt) => {
                assert_eq!(prompt.kind, PromptKind::Confirm);
                assert_eq!(prompt.question, "Roll back frontend to v5? (y/n): ");
            }
            other => panic!("expected confirmation, got {other:?}"),
        }

        let plan = Plan::Frontend {
            target: target(),
            version: v(5),
            current: Some(v(7)),
        };
        assert_eq!(selector.advance(answer("Y")).unwrap(), Effect::Apply(plan.clone()));
        assert_eq!(
            selector.advance(Input::Applied).unwrap(),
            Effect::Finish(Outcome::RolledBack(plan))
        );
    }

    #[test]
    fn anything_but_y_cancels() {
        for reply in ["n", "yes", "", "no"] {
            let mut selector = at_frontend_menu(&[2, 1], Some(2));
            selector.advance(answer("2")).unwrap();
            assert_eq!(
                selector.advance(answer(reply)).unwrap(),
                Effect::Finish(Outcome::Cancelled),
                "reply {reply:?}"
            );
        }
    }

    #[test]
    fn empty_frontend_listing_finishes() {
        let mut selector = started();
        selector.advance(answer("1")).unwrap();
        let effect = selector
            .advance(Input::FrontendVersions {
                target: target(),
                versions: vec![],
                current: None,
            })
            .unwrap();
        assert!(matches!(effect, Effect::Finish(Outcome::NothingToRollBack(_))));
    }

    #[test]
    fn function_path_selects_then_loads_versions() {
        let orders = FunctionName::new("shop-orders-prod");
        let mut selector = started();
        selector.advance(answer("2")).unwrap();
        selector
            .advance(Input::Functions(vec![
                FunctionName::new("shop-api-prod"),
                orders.clone(),
            ]))
            .unwrap();

        assert_eq!(
            selector.advance(answer("2")).unwrap(),
            Effect::LoadFunctionVersions(orders.clone())
        );

        selector
            .advance(Input::FunctionVersions(vec![
                function_candidate(3, true),
                function_candidate(2, false),
            ]))
            .unwrap();
        assert!(matches!(
            selector.advance(answer("2")).unwrap(),
            Effect::Ask(Prompt { kind: PromptKind::Confirm, .. })
        ));
        assert_eq!(
            selector.advance(answer("y")).unwrap(),
            Effect::Apply(Plan::Function {
                function: orders,
                version: FunctionVersion::Published(2),
            })
        );
    }

    #[test]
    fn choosing_bound_function_version_is_a_no_op() {
        let mut selector = started();
        selector.advance(answer("2")).unwrap();
        selector
            .advance(Input::Functions(vec![FunctionName::new("shop-api-prod")]))
            .unwrap();
        selector.advance(answer("1")).unwrap();
        selector
            .advance(Input::FunctionVersions(vec![
                function_candidate(4, false),
                function_candidate(3, true),
            ]))
            .unwrap();
        assert_eq!(
            selector.advance(answer("2")).unwrap(),
            Effect::Finish(Outcome::AlreadyCurrent)
        );
    }

    #[test]
    fn unexpected_input_is_rejected_without_losing_state() {
        let mut selector = started();
        let err = selector.advance(Input::Applied).unwrap_err();
        assert_eq!(
            err,
            SelectorError::UnexpectedInput {
                state: "choosing a target",
                input: "applied",
            }
        );
        assert_eq!(selector.advance(answer("1")).unwrap(), Effect::LoadFrontendVersions);
    }
}

use anyhow::{Context, bail};

use hft_core::{backend::ViewerId, command::tokenize};
use hft_model::DimensionId;

/// One stdin line of the agent.
///
/// Viewer events simulate the host's connection events; anything else is
/// handed to the operator command parser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputLine {
    Join {
        id: ViewerId,
        name: String,
        dimension: DimensionId,
    },
    Leave {
        id: ViewerId,
    },
    Dimension {
        id: ViewerId,
        dimension: DimensionId,
    },
    Quit,
    Blank,
    Operator(String),
}

impl InputLine {
    pub fn parse(line: &str) -> anyhow::Result<Self> {
        let tokens = tokenize(line)?;
        let Some(verb) = tokens.first() else {
            return Ok(InputLine::Blank);
        };

        let parsed = match verb.to_ascii_lowercase().as_str() {
            "join" => {
                let [_, id, name, dim] = tokens.as_slice() else {
                    bail!("usage: join <id> <name> <dimid>");
                };
                InputLine::Join {
                    id: viewer_id(id)?,
                    name: name.clone(),
                    dimension: dimension(dim)?,
                }
            }
            "leave" => {
                let [_, id] = tokens.as_slice() else {
                    bail!("usage: leave <id>");
                };
                InputLine::Leave { id: viewer_id(id)? }
            }
            "dimension" => {
                let [_, id, dim] = tokens.as_slice() else {
                    bail!("usage: dimension <id> <dimid>");
                };
                InputLine::Dimension {
                    id: viewer_id(id)?,
                    dimension: dimension(dim)?,
                }
            }
            "quit" | "exit" => InputLine::Quit,
            _ => InputLine::Operator(line.to_string()),
        };
        Ok(parsed)
    }
}

fn viewer_id(raw: &str) -> anyhow::Result<ViewerId> {
    let id = raw.parse().with_context(|| format!("invalid viewer id '{raw}'"))?;
    Ok(ViewerId::new(id))
}

fn dimension(raw: &str) -> anyhow::Result<DimensionId> {
    let id = raw.parse().with_context(|| format!("invalid dimension id '{raw}'"))?;
    Ok(DimensionId::new(id))
}

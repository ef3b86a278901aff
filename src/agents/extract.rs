//! Plan extraction from streamed pipeline output

use crate::agents::{AgentMessage, StreamedChunk, PLAN_AGENT_NAME};

/// Find the final plan in a sequence of chunks.
///
/// Chunks are visited in arrival order. Within each plan-agent output the
/// messages are scanned newest first, so a later revision in the same turn
/// wins over an earlier draft. Only AI-authored messages containing `marker`
/// qualify. Returns `None` when nothing matches.
pub fn extract_plan<'a, I>(chunks: I, marker: &str) -> Option<String>
where
    I: IntoIterator<Item = &'a StreamedChunk>,
{
    chunks
        .into_iter()
        .flat_map(|chunk| chunk.outputs.iter())
        .filter(|output| output.agent == PLAN_AGENT_NAME)
        .find_map(|output| {
            output.messages.iter().rev().find_map(|message| match message {
                AgentMessage::Ai { content, .. }
                    if !content.is_empty() && content.contains(marker) =>
                {
                    Some(content.clone())
                }
                _ => None,
            })
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agents::{NodeOutput, RESEARCH_AGENT_NAME, SUPERVISOR_NAME};
    use crate::config::DEFAULT_PLAN_MARKER;

    const MARKER: &str = DEFAULT_PLAN_MARKER;

    #[test]
    fn test_latest_plan_message_wins() {
        let chunks = vec![
            StreamedChunk::single(
                SUPERVISOR_NAME,
                vec![AgentMessage::ai(SUPERVISOR_NAME, "routing")],
            ),
            StreamedChunk::single(
                PLAN_AGENT_NAME,
                vec![
                    AgentMessage::human("User details:"),
                    AgentMessage::ai(PLAN_AGENT_NAME, "# Weekly Gym Training Plan\ndraft"),
                    AgentMessage::ai(PLAN_AGENT_NAME, "# Weekly Gym Training Plan\nrevised"),
                    AgentMessage::ai(PLAN_AGENT_NAME, "Transferring back to supervisor"),
                ],
            ),
        ];

        assert_eq!(
            extract_plan(&chunks, MARKER).as_deref(),
            Some("# Weekly Gym Training Plan\nrevised")
        );
    }

    #[test]
    fn test_first_qualifying_chunk_stops_scan() {
        let chunks = vec![
            StreamedChunk::single(
                PLAN_AGENT_NAME,
                vec![AgentMessage::ai(PLAN_AGENT_NAME, "# Weekly Gym Training Plan\nfirst turn")],
            ),
            StreamedChunk::single(
                PLAN_AGENT_NAME,
                vec![AgentMessage::ai(PLAN_AGENT_NAME, "# Weekly Gym Training Plan\nsecond turn")],
            ),
        ];

        assert_eq!(
            extract_plan(&chunks, MARKER).as_deref(),
            Some("# Weekly Gym Training Plan\nfirst turn")
        );
    }

    #[test]
    fn test_h2_heading_also_matches() {
        let chunks = vec![StreamedChunk::single(
            PLAN_AGENT_NAME,
            vec![AgentMessage::ai(PLAN_AGENT_NAME, "## Weekly Gym Training Plan\n| Day |")],
        )];
        assert!(extract_plan(&chunks, MARKER).is_some());
    }

    #[test]
    fn test_ignores_other_agents_and_non_ai_messages() {
        let plan_text = "# Weekly Gym Training Plan\ncopied";
        let chunks = vec![
            StreamedChunk::single(
                RESEARCH_AGENT_NAME,
                vec![AgentMessage::ai(RESEARCH_AGENT_NAME, plan_text)],
            ),
            StreamedChunk::single(
                SUPERVISOR_NAME,
                vec![AgentMessage::ai(SUPERVISOR_NAME, plan_text)],
            ),
            StreamedChunk::single(
                PLAN_AGENT_NAME,
                vec![
                    AgentMessage::human(plan_text),
                    AgentMessage::Tool {
                        name: "tavily_search".to_string(),
                        tool_call_id: "call_1".to_string(),
                        content: plan_text.to_string(),
                    },
                ],
            ),
        ];

        assert_eq!(extract_plan(&chunks, MARKER), None);
    }

    #[test]
    fn test_multiple_outputs_in_one_chunk() {
        let chunks = vec![StreamedChunk {
            outputs: vec![
                NodeOutput {
                    agent: RESEARCH_AGENT_NAME.to_string(),
                    messages: vec![AgentMessage::ai(RESEARCH_AGENT_NAME, "prices")],
                },
                NodeOutput {
                    agent: PLAN_AGENT_NAME.to_string(),
                    messages: vec![AgentMessage::ai(
                        PLAN_AGENT_NAME,
                        "# Weekly Gym Training Plan\nok",
                    )],
                },
            ],
        }];
        assert_eq!(
            extract_plan(&chunks, MARKER).as_deref(),
            Some("# Weekly Gym Training Plan\nok")
        );
    }

    #[test]
    fn test_not_found() {
        let chunks = vec![
            StreamedChunk::single(SUPERVISOR_NAME, vec![AgentMessage::ai(SUPERVISOR_NAME, "done")]),
            StreamedChunk::single(
                PLAN_AGENT_NAME,
                vec![AgentMessage::ai(PLAN_AGENT_NAME, "Here is a plan")],
            ),
            StreamedChunk::default(),
        ];
        assert_eq!(extract_plan(&chunks, MARKER), None);
        assert_eq!(extract_plan(&Vec::<StreamedChunk>::new(), MARKER), None);
    }
}

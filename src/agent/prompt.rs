use crate::agent::input_types::ChatMessage;
use crate::agent::output_types::AgentStep;
use crate::agent::tools::ToolInterface;

pub const FINAL_ANSWER_ACTION: &str = "Final Answer";

/// Sent as a stop sequence so the model does not invent tool results
pub const OBSERVATION_STOP: &str = "Observation:";

const PREAMBLE: &str = "You are a helpful assistant that answers questions and holds \
conversations on a wide range of topics. You can look things up when a question needs \
current or factual information you are unsure about, and you combine what you find with \
what you already know to give clear, accurate answers.";

const FORMAT_INSTRUCTIONS: &str = r#"RESPONSE FORMAT INSTRUCTIONS
----------------------------

When responding, output a markdown code snippet formatted in one of two ways.

**Option 1:**
Use this when you want to call a tool.

```json
{
    "action": string, // one of [{tool_names}]
    "action_input": string // the input to the tool
}
```

**Option #2:**
Use this when you want to respond directly to the user.

```json
{
    "action": "Final Answer",
    "action_input": string // your reply to the user
}
```"#;

const TOOL_RESPONSE: &str = "TOOL RESPONSE:
---------------------
{observation}

USER'S INPUT
--------------------

Okay, so what is the response to my last comment? If using information obtained from \
the tools you must mention it explicitly without mentioning the tool names. I have \
forgotten all TOOL RESPONSES! Remember to respond with a markdown code snippet of a json \
blob with a single action, and NOTHING else.";

fn tools_section(tools: &[&dyn ToolInterface]) -> String {
    let listing = tools
        .iter()
        .map(|tool| format!("> {}: {}", tool.name(), tool.description()))
        .collect::<Vec<_>>()
        .join("\n");
    let names = tools
        .iter()
        .map(|tool| tool.name())
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        "TOOLS\n------\nYou can ask the user to use tools to look up information that may be \
         helpful in answering the user's original question. The tools are:\n\n{}\n\n{}",
        listing,
        FORMAT_INSTRUCTIONS.replace("{tool_names}", &names)
    )
}

fn user_turn(tools: &[&dyn ToolInterface], input: &str) -> String {
    format!(
        "{}\n\nUSER'S INPUT\n--------------------\nHere is the user's input (remember to \
         respond with a markdown code snippet of a json blob with a single action, and \
         NOTHING else):\n\n{}",
        tools_section(tools),
        input
    )
}

/// Build the full message list for one model turn.
///
/// Layout: preamble, prior chat history, the tool-aware user turn, then one
/// assistant/user pair per completed step.
pub fn build_messages(
    tools: &[&dyn ToolInterface],
    input: &str,
    chat_history: &[ChatMessage],
    steps: &[AgentStep],
) -> Vec<ChatMessage> {
    let mut messages = Vec::with_capacity(chat_history.len() + steps.len() * 2 + 2);
    messages.push(ChatMessage::system(PREAMBLE));
    messages.extend(chat_history.iter().cloned());
    messages.push(ChatMessage::user(user_turn(tools, input)));

    for step in steps {
        messages.push(ChatMessage::assistant(step.log.clone()));
        messages.push(ChatMessage::user(
            TOOL_RESPONSE.replace("{observation}", &step.observation),
        ));
    }

    messages
}

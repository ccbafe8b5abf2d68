//! Prompt construction for the policy analysis.

use super::completion::ChatMessage;

/// Marks the start and end of the policy text in the user message.
pub const DELIMITER: &str = "####";

/// Build the system and user messages for one policy.
pub fn build_analysis_messages(policy_text: &str) -> Vec<ChatMessage> {
    vec![
        ChatMessage::system(system_prompt()),
        ChatMessage::user(format!("{DELIMITER}{policy_text}{DELIMITER}")),
    ]
}

fn system_prompt() -> String {
    format!(
        r#"You will be given privacy policy text inside {DELIMITER} characters.

Analyze ONLY the text inside the delimiters.
If something is not directly stated, output: "Not specified".

Your output MUST be a single valid JSON object with this exact structure:

{{
    "data_collecting": {{
        "details": "Comma separated list of the data types explicitly stated in the policy. If none are stated, write 'Not specified'.",
        "severity": "Low" or "Medium" or "High"
    }},
    "data_sharing": {{
        "details": "One sentence on who data is shared with, based ONLY on what is explicitly written. If not stated, write 'Not specified'.",
        "severity": "Low" or "Medium" or "High"
    }},
    "data_retention": {{
        "details": "State ONLY the retention period explicitly written in the text. If it is vague, say it varies. If the policy does NOT contain a numeric time period (a number AND a time unit), write 'Not specified'. Never guess or invent time periods.",
        "severity": "Low" or "Medium" or "High"
    }},
    "overall_privacy_risk": "Low" or "Medium" or "High"
}}

STRICT RULES:
- Do NOT add any explanation outside the JSON."#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_message_is_delimited() {
        let messages = build_analysis_messages("We collect cookies.");
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, "system");
        assert_eq!(messages[1].role, "user");
        assert_eq!(messages[1].content, "####We collect cookies.####");
    }

    #[test]
    fn test_system_prompt_names_every_field() {
        let prompt = system_prompt();
        for field in [
            "data_collecting",
            "data_sharing",
            "data_retention",
            "overall_privacy_risk",
        ] {
            assert!(prompt.contains(field), "missing {}", field);
        }
        assert!(prompt.contains("inside #### characters"));
        assert!(!prompt.contains("{{"));
    }
}

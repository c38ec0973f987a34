use crate::domain::{FormLanguage, UserField, UserInfo};

pub const DOCUMENT_SYSTEM_PROMPT: &str = "You are a document analysis assistant. \
You receive raw text extracted from a scanned document by an OCR system. \
The text may contain recognition errors; interpret it sensibly and never invent \
information that is not present in it.";

/// Prompt for a free-form question about an OCR'd document, or a summary when no question is given.
pub fn document_prompt(text: &str, question: Option<&str>) -> String {
    let task = match question.map(str::trim).filter(|q| !q.is_empty()) {
        Some(question) => format!("Answer the following question about the document: {question}"),
        None => "Summarize the document, listing its key facts (names, dates, amounts).".to_string(),
    };

    format!("{task}\n\nDocument text:\n\"\"\"\n{text}\n\"\"\"")
}

pub fn form_extraction_prompt() -> String {
    let english = pretty(FormLanguage::English);
    let hebrew = pretty(FormLanguage::Hebrew);

    format!(
        r#"You are a data organization expert specializing in processing forms and extracting structured information about individuals. Take the raw text produced by an OCR system from a form, analyze it, and organize the information into well-structured JSON.

The input:
- is raw text extracted from a form, in English or Hebrew;
- contains personal information, addresses and medical details;
- may contain OCR errors such as dates with wrong separators ('02 05 1999', '02|05|1999', '0 2 02 1 99 5') or numbers split by '|' or 'l'.

If the text is in English, produce JSON with exactly this structure:
{english}

If the text is in Hebrew, produce JSON with exactly this structure:
{hebrew}

Special considerations:
- Every phone number (landline or mobile) starts with 0; if another digit appears first, make it 0.
- A landline number never starts with "05"; a number starting with "05" is a mobile number.
- Leave a field as an empty string when it is missing or cannot be extracted.
- Dates in the form are day/month/year; split them into day, month and year. "0" is never a valid day.
- Dates may appear with arbitrary spaces between digits; rely on the digit order.
- The health fund membership field is taken only from section 5 of the form.

Output requirements:
- Combine numbers split by '|' or 'l'.
- Follow the JSON structure above exactly and return valid JSON only."#
    )
}

pub fn form_extraction_request(text: &str) -> String {
    format!("Extract the text from the data, following the above guidelines: {text}")
}

fn pretty(language: FormLanguage) -> String {
    serde_json::to_string_pretty(language.template()).unwrap_or_default()
}

pub fn intake_collect_prompt(
    collected: &UserInfo,
    user_input: &str,
    previous_output: &str,
    confirmation_status: bool,
) -> String {
    let fields = UserField::ALL
        .iter()
        .map(|f| format!("- {}{}", f.as_str(), field_hint(*f)))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        r#"You are a helpful assistant, proficient in Hebrew and English, collecting user information for the following fields:
{fields}

Always use these exact keys.

Current collected data: {collected}
User input: "{user_input}"
Assistant's previous message: "{previous_output}"
Confirmation status: {confirmation_status}

Your response MUST be a single valid JSON object with no trailing commas and no surrounding formatting, containing the keys "field_to_update", "value", "message_to_user", "confirmation_status" and "transition_to_qa".
- Set "value" to null when the user input is invalid or does not apply.
- When the input is valid, put it in "value" and move on to the next missing field.
- When the input is invalid, explain what is expected in "message_to_user".
- When all data is collected, summarize it and ask for confirmation.
- Reply to the user in Hebrew if they write Hebrew, otherwise in English.

{{
    "field_to_update": "<field name or null>",
    "value": "<value or null>",
    "message_to_user": "<message>",
    "confirmation_status": <true or false>,
    "transition_to_qa": <true or false>
}}"#,
        collected = render_user_info(collected),
    )
}

pub fn intake_confirm_prompt(
    collected: &UserInfo,
    user_input: &str,
    previous_output: &str,
    confirmation_status: bool,
) -> String {
    format!(
        r#"All required information has been collected:
{collected}

User input: "{user_input}"
Assistant's previous message: "{previous_output}"
Confirmation status: {confirmation_status}

Ask the user to confirm the information above. Treat "yes", "correct", "all good", "confirmed", "כן", "אני מאשר", "הכל בסדר", "מאושר" or "אכן" as confirmation, but only once the user has been asked whether the data is correct.
- On confirmation set "confirmation_status" and "transition_to_qa" to true.
- On denial or corrections set "confirmation_status" to false, ask which field is wrong, and when a valid correction is given return it in "field_to_update" and "value", then ask for final confirmation.

Respond with a single valid JSON object, escaping newlines:
{{
    "field_to_update": "<field name or null>",
    "value": "<value or null>",
    "message_to_user": "<message in Hebrew or English>",
    "confirmation_status": <true or false>,
    "transition_to_qa": <true or false>
}}"#,
        collected = render_user_info(collected),
    )
}

pub fn answer_query_prompt(
    hmo_name: &str,
    membership_tier: &str,
    contexts: &[&str],
    question: &str,
) -> String {
    format!(
        r#"You are an expert in Israeli healthcare services. Answer the user's query ONLY based on the given context and the user's details:
- HMO: {hmo_name}
- Membership tier: {membership_tier}

Contexts relevant to the query:
{contexts}

User's question: {question}

Guidelines:
1. Base the reply only on the given context.
2. If the answer is not in the context, say that you do not know.
3. Be accurate.
4. Reply in English to English questions and in Hebrew to Hebrew questions."#,
        contexts = contexts.join("\n---\n"),
    )
}

fn field_hint(field: UserField) -> &'static str {
    match field {
        UserField::IdNumber | UserField::HmoCardNumber => " (9-digit number)",
        UserField::Age => " (between 0 and 120)",
        UserField::HmoName => " (מכבי=maccabi, כללית=clalit, מאוחדת=meuhedet)",
        UserField::InsuranceMembershipTier => " (זהב=gold, כסף=silver, ארד=bronze)",
        _ => "",
    }
}

fn render_user_info(info: &UserInfo) -> String {
    serde_json::to_string(info.as_map()).unwrap_or_default()
}

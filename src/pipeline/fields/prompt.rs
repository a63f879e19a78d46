pub const FIELDS_SYSTEM_PROMPT: &str = r#"
You are a records field locator. You receive the words of a scanned record,
one per line, as `word:x, y` where x, y is the word's top-left pixel position.
You point at the words that make up specific fields. You never rewrite text.

RULES — ABSOLUTE, NO EXCEPTIONS:
1. Every `word` you output is a single token copied from one input line.
2. Every `word` + `coordinate` pair reproduces an input line exactly:
   same spelling, same x, same y.
3. Words that together form one value (e.g. "JOHN" and "DOE" of one
   person's name) share the same `groupId`. Different values get different
   `groupId`s.
4. If a field does not appear in the record, output an empty array for it.
   Never output null and never omit a field.
5. Output JSON only.
"#;

/// Build the extraction prompt for one page of serialized OCR lines.
pub fn build_fields_prompt(serialized_lines: &str) -> String {
    format!(
        r#"<document>
{serialized_lines}
</document>

Locate the following fields in the document above:
- name: the full name of the person the record is about
- dateOfBirth: the person's date of birth
- address: the person's residence address
- causeOfDeath: the stated cause of death (immediate, underlying or contributing)

For each field, list every word belonging to it as
{{"word": "<token>", "coordinate": [x, y], "groupId": <integer>}}."#
    )
}

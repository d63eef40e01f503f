//! LLM prompts for the evaluation stages.
//!
//! Every prompt exists once per [`Locale`]. Placeholders in braces are
//! substituted by the `format_*` functions.

use crate::types::config::Locale;

const DESCRIBE_EN: &str = "Provide a concise, one-line descriptor summarizing the content of the website.

Content snippet:
{snippet}";

const DESCRIBE_PT: &str = "Forneça uma descrição concisa de uma linha resumindo o conteúdo do site.

Trecho do conteúdo:
{snippet}";

const SUFFICIENCY_EN: &str = "Based on the following website description:
'{descriptor}'
and the additional insights so far: {insights}
Do you have enough information to reliably evaluate this business idea? Answer with 'yes' or 'no'.";

const SUFFICIENCY_PT: &str = "Com base na seguinte descrição do site:
'{descriptor}'
e nos insights adicionais até agora: {insights}
Temos informações suficientes para avaliar esta ideia de negócio de forma confiável? Responda com 'sim' ou 'não'.";

const INSIGHT_EN: &str = "Website description: '{descriptor}'.
Existing insights: {insights}.
What is one additional insight or factor that should be considered to evaluate this business idea? Answer in one concise sentence.";

const INSIGHT_PT: &str = "Descrição do site: '{descriptor}'.
Insights existentes: {insights}.
Qual é um insight ou fator adicional que deve ser considerado para avaliar esta ideia de negócio? Responda em uma frase concisa.";

const TRENDS_EN: &str = "Based on the website description '{descriptor}' and the new insight '{insight}', provide an updated, brief summary of relevant market trends in one sentence.";

const TRENDS_PT: &str = "Com base na descrição do site '{descriptor}' e no novo insight '{insight}', forneça um breve resumo atualizado das tendências de mercado relevantes em uma frase.";

const VERDICT_EN: &str = "Using the website description:
'{descriptor}'
and the following additional insights: {insights}
with market trends summary: '{trends}'
Provide a final business evaluation in 3-5 lines and rate the business idea on a scale from 1 (poor) to 10 (excellent). Format your answer as: 'Final Summary: ...; Rating: X'";

const VERDICT_PT: &str = "Usando a descrição do site:
'{descriptor}'
e os seguintes insights adicionais: {insights}
com o resumo das tendências de mercado: '{trends}'
Forneça uma avaliação final do negócio em 3-5 linhas e avalie a ideia em uma escala de 1 (ruim) a 10 (excelente). Formate sua resposta como: 'Resumo Final: ...; Nota: X'";

/// First `max_chars` characters of `content`, never splitting a character.
pub fn snippet(content: &str, max_chars: usize) -> &str {
    match content.char_indices().nth(max_chars) {
        Some((idx, _)) => &content[..idx],
        None => content,
    }
}

/// Substitute `{name}` placeholders in one pass over the template.
///
/// Substituted text is never rescanned, so values containing braces are
/// embedded verbatim. Unknown placeholders are left as written.
fn fill(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let tail = &rest[open + 1..];

        let hit = values.iter().find(|(name, _)| {
            tail.starts_with(name) && tail[name.len()..].starts_with('}')
        });

        match hit {
            Some((name, value)) => {
                out.push_str(value);
                rest = &tail[name.len() + 1..];
            }
            None => {
                out.push('{');
                rest = tail;
            }
        }
    }

    out.push_str(rest);
    out
}

/// Format the one-line summarization prompt.
pub fn format_describe_prompt(locale: Locale, snippet: &str) -> String {
    let template = match locale {
        Locale::English => DESCRIBE_EN,
        Locale::Portuguese => DESCRIBE_PT,
    };
    fill(template, &[("snippet", snippet)])
}

/// Format the yes/no sufficiency prompt.
pub fn format_sufficiency_prompt(locale: Locale, descriptor: &str, insights: &str) -> String {
    let template = match locale {
        Locale::English => SUFFICIENCY_EN,
        Locale::Portuguese => SUFFICIENCY_PT,
    };
    fill(template, &[("descriptor", descriptor), ("insights", insights)])
}

/// Format the prompt asking for one new insight.
pub fn format_insight_prompt(locale: Locale, descriptor: &str, insights: &str) -> String {
    let template = match locale {
        Locale::English => INSIGHT_EN,
        Locale::Portuguese => INSIGHT_PT,
    };
    fill(template, &[("descriptor", descriptor), ("insights", insights)])
}

/// Format the market trends prompt for a freshly produced insight.
pub fn format_trends_prompt(locale: Locale, descriptor: &str, insight: &str) -> String {
    let template = match locale {
        Locale::English => TRENDS_EN,
        Locale::Portuguese => TRENDS_PT,
    };
    fill(template, &[("descriptor", descriptor), ("insight", insight)])
}

/// Format the final verdict prompt.
pub fn format_verdict_prompt(
    locale: Locale,
    descriptor: &str,
    insights: &str,
    trends: &str,
) -> String {
    let template = match locale {
        Locale::English => VERDICT_EN,
        Locale::Portuguese => VERDICT_PT,
    };
    fill(
        template,
        &[
            ("descriptor", descriptor),
            ("insights", insights),
            ("trends", trends),
        ],
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snippet_respects_char_boundaries() {
        assert_eq!(snippet("abcdef", 3), "abc");
        assert_eq!(snippet("abc", 10), "abc");
        assert_eq!(snippet("ãçé€x", 4), "ãçé€");
        assert_eq!(snippet("", 5), "");
    }

    #[test]
    fn test_format_describe_prompt() {
        let formatted = format_describe_prompt(Locale::English, "Acme builds rockets");
        assert!(formatted.contains("one-line descriptor"));
        assert!(formatted.ends_with("Acme builds rockets"));
    }

    #[test]
    fn test_format_sufficiency_prompt() {
        let formatted = format_sufficiency_prompt(Locale::English, "Rocket maker", "None");
        assert!(formatted.contains("'Rocket maker'"));
        assert!(formatted.contains("insights so far: None"));
        assert!(formatted.contains("'yes' or 'no'"));
    }

    #[test]
    fn test_format_trends_prompt_embeds_new_insight() {
        let formatted = format_trends_prompt(Locale::English, "Rocket maker", "Launch costs fall");
        assert!(formatted.contains("new insight 'Launch costs fall'"));
    }

    #[test]
    fn test_format_verdict_prompt_uses_locale_marker() {
        let en = format_verdict_prompt(Locale::English, "d", "i", "t");
        let pt = format_verdict_prompt(Locale::Portuguese, "d", "i", "t");
        assert!(en.contains(&format!("{}: X", Locale::English.rating_marker())));
        assert!(pt.contains(&format!("{}: X", Locale::Portuguese.rating_marker())));
    }

    #[test]
    fn test_portuguese_sufficiency_asks_for_affirmative_token() {
        let formatted = format_sufficiency_prompt(Locale::Portuguese, "d", "Nenhum");
        assert!(formatted.contains(&format!("'{}'", Locale::Portuguese.affirmative_token())));
    }

    #[test]
    fn test_braces_in_values_are_not_substituted_again() {
        let formatted = format_verdict_prompt(
            Locale::English,
            "Site about {insights} templates",
            "INS",
            "{descriptor}",
        );
        assert!(formatted.contains("'Site about {insights} templates'"));
        assert!(formatted.contains("insights: INS"));
        assert!(formatted.contains("summary: '{descriptor}'"));
    }

    #[test]
    fn test_fill_leaves_unknown_placeholders_and_stray_braces() {
        assert_eq!(fill("a {x} {y} {", &[("x", "1")]), "a 1 {y} {");
        assert_eq!(fill("{x}{x}", &[("x", "{x}")]), "{x}{x}");
        assert_eq!(fill("ã{x}é", &[("x", "ç")]), "ãçé");
    }
}

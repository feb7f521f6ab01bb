//! # Tokenizador de Palavras (convenções Treebank)
//!
//! Divide uma sentença em tokens no estilo Penn Treebank: pontuação vira
//! token próprio, contrações são separadas ("don't" → "do" + "n't"),
//! aspas são promovidas para `` e '', e a capitalização nunca é alterada.
//!
//! A implementação é uma cadeia determinística de substituições de regex
//! aplicadas em ordem fixa, seguida de um split por espaços. O ponto final
//! só é separado quando encerra o texto e é precedido por um caractere que
//! não seja ponto — assim "U.S." atravessa o tokenizador intacto quando a
//! sentença continua, e "met." vira "met" + "." no fim dela.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::token::Token;

/// Regras aplicadas antes do preenchimento com espaços, em ordem.
static OPENING_RULES: Lazy<Vec<(Regex, &'static str)>> = Lazy::new(|| {
    [
        // Aspas de abertura.
        (r#"^""#, "`` "),
        (r"(``)", " ${1} "),
        (r#"([ \(\[{<])""#, "${1} `` "),
        // Pontuação.
        (r"([:,])([^\d])", " ${1} ${2}"),
        (r"\.\.\.", " ... "),
        (r"[;@#$%&]", " ${0} "),
        (r#"([^\.])(\.)([\]\)}>"']*)\s*$"#, "${1} ${2}${3} "),
        (r"[?!]", " ${0} "),
        (r"([^'])' ", "${1} ' "),
        // Parênteses, colchetes e travessão duplo.
        (r"[\]\[\(\)\{\}<>]", " ${0} "),
        (r"--", " -- "),
    ]
    .into_iter()
    .map(|(rx, rep)| (Regex::new(rx).expect("regra de tokenização"), rep))
    .collect()
});

/// Regras aplicadas depois do preenchimento: aspas de fechamento e clíticos.
static CLOSING_RULES: Lazy<Vec<(Regex, &'static str)>> = Lazy::new(|| {
    [
        (r#"""#, " '' "),
        (r"(\S)('')", "${1} ${2} "),
        // Contrações: possessivos e formas curtas primeiro, depois as longas.
        (r"([^' ])('[sS]|'[mM]|'[dD]|') ", "${1} ${2} "),
        (r"([^' ])('ll|'LL|'re|'RE|'ve|'VE|n't|N'T) ", "${1} ${2} "),
        // Fusões lexicalizadas.
        (r"(?i)\b(can)(not)\b", "${1} ${2}"),
        (r"(?i)\b(gim)(me)\b", "${1} ${2}"),
        (r"(?i)\b(gon)(na)\b", "${1} ${2}"),
        (r"(?i)\b(lem)(me)\b", "${1} ${2}"),
        (r"(?i)\b(wan)(na)\b", "${1} ${2}"),
    ]
    .into_iter()
    .map(|(rx, rep)| (Regex::new(rx).expect("regra de tokenização"), rep))
    .collect()
});

/// Tokenizador determinístico de palavras.
#[derive(Debug, Default)]
pub struct TreebankWordTokenizer;

impl TreebankWordTokenizer {
    pub fn new() -> Self {
        Self
    }

    /// Tokeniza uma sentença. Os tokens saem com `tag` e `label` vazios e na
    /// ordem do texto original.
    pub fn tokenize(&self, text: &str) -> Vec<Token> {
        let mut work = text.to_string();
        for (rx, rep) in OPENING_RULES.iter() {
            work = rx.replace_all(&work, *rep).into_owned();
        }
        work = format!(" {work} ");
        for (rx, rep) in CLOSING_RULES.iter() {
            work = rx.replace_all(&work, *rep).into_owned();
        }
        work.split_whitespace().map(Token::new).collect()
    }
}

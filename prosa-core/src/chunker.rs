//! # Agrupamento de Entidades
//!
//! Dois caminhos de extração sobre tokens anotados:
//!
//! - **IOB** ([`tokens_to_entities`]): varredura linear que funde `B-X`
//!   seguido de `I-X` em um [`Entity`] por span. A continuação por POS
//!   repetida (dois tokens vizinhos com a mesma tag seguem no mesmo span
//!   mesmo que o rótulo mude) é contrato observável do modelo de referência
//!   e é mantida.
//! - **Regex sobre tags quadrificadas** ([`locate`]/[`chunk`]): cada tag é
//!   ajustada para exatamente 4 caracteres (completada com `_` ou truncada)
//!   e a concatenação vira a string onde um regex casa em fronteiras de 4.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::token::{Entity, Token};

/// Padrão default: sequências de nomes próprios, opcionalmente precedidas de
/// cardinais e possivelmente unidas por preposições.
pub static TREEBANK_NAMED_ENTITIES: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"((CD__)*(NNP.)+(CD__|NNP.)*)+((IN__)*(CD__)*(NNP.)+(CD__|NNP.)*)*")
        .expect("regex de entidades Treebank")
});

/// Funde tokens rotulados (IOB) em entidades, na ordem de primeira
/// ocorrência. Um resíduo aberto no fim da sequência é emitido como se um
/// `O` seguisse.
pub fn tokens_to_entities(tokens: &[Token]) -> Vec<Entity> {
    let mut entities = Vec::new();
    let mut end = String::new();
    let mut parts: Vec<&Token> = Vec::new();

    for tok in tokens {
        let label = tok.label.as_str();
        let same_pos = parts.last().is_some_and(|p| p.tag == tok.tag);

        if (label != "O" && label != end) || same_pos {
            end = label.replacen('B', "I", 1);
            parts.push(tok);
        } else if (label == "O" && !end.is_empty()) || label == end {
            if label != "O" {
                parts.push(tok);
            }
            if let Some(entity) = coalesce(&parts) {
                entities.push(entity);
            }
            end.clear();
            parts.clear();
        }
    }

    if let Some(entity) = coalesce(&parts) {
        entities.push(entity);
    }
    entities
}

/// Junta um span de tokens em um [`Entity`]: texto unido por espaço, rótulo
/// tirado do primeiro token (parte após o prefixo IOB).
fn coalesce(parts: &[&Token]) -> Option<Entity> {
    let first = parts.first()?;
    let label = first
        .label
        .splitn(2, '-')
        .nth(1)
        .unwrap_or(first.label.as_str());
    let text = parts
        .iter()
        .map(|t| t.text.as_str())
        .collect::<Vec<_>>()
        .join(" ");
    Some(Entity {
        text,
        label: label.to_string(),
    })
}

/// Spans (em índices de token) onde o regex casa na string quadrificada.
/// Os offsets de byte do regex são sempre múltiplos de 4.
pub fn locate(tagged: &[Token], rx: &Regex) -> Vec<[usize; 2]> {
    let quad = quadrify(tagged);
    rx.find_iter(&quad)
        .map(|m| [m.start() / 4, m.end() / 4])
        .collect()
}

/// Texto de cada span casado, unido por espaço.
pub fn chunk(tagged: &[Token], rx: &Regex) -> Vec<String> {
    locate(tagged, rx)
        .into_iter()
        .map(|[start, end]| {
            tagged[start..end]
                .iter()
                .map(|t| t.text.as_str())
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect()
}

/// Concatena as tags, cada uma com exatamente 4 caracteres.
fn quadrify(tagged: &[Token]) -> String {
    let mut quad = String::with_capacity(tagged.len() * 4);
    for tok in tagged {
        let mut n = 0;
        for c in tok.tag.chars().take(4) {
            quad.push(c);
            n += 1;
        }
        for _ in n..4 {
            quad.push('_');
        }
    }
    quad
}

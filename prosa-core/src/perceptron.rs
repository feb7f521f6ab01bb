//! # POS Tagger — Averaged Perceptron
//!
//! Classificador linear esparso usado apenas em inferência: os pesos já são
//! as médias calculadas durante o treino original. A decodificação é gulosa,
//! da esquerda para a direita, com um histórico de duas tags.
//!
//! ## Algoritmo
//!
//! Para cada token:
//! 1. Normaliza a palavra (minúsculas; dígitos viram `!YEAR`/`!DIGITS`).
//! 2. Se o `tagdict` conhece a palavra, a tag é emitida direto — o
//!    dicionário só contém palavras estatisticamente inambíguas.
//! 3. Caso contrário, soma os pesos das features ativas por classe e escolhe
//!    a de maior pontuação (empates resolvidos por ordem lexicográfica).
//!
//! Features ausentes da tabela contribuem zero; isso não é erro.

use std::collections::{BTreeSet, HashMap};

use serde::{Deserialize, Serialize};

use crate::error::{ProsaError, Result};
use crate::token::Token;

/// Tabelas pré-treinadas do tagger.
///
/// `weights` é esparso nos dois níveis: feature ausente e par
/// (feature, classe) ausente valem zero.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PerceptronModel {
    /// Pesos médios: feature → (classe → peso).
    pub weights: HashMap<String, HashMap<String, f64>>,
    /// Palavras inambíguas: forma normalizada → tag.
    pub tagdict: HashMap<String, String>,
    /// Todas as tags que o modelo conhece. `BTreeSet` garante iteração em
    /// ordem lexicográfica, que é a ordem de desempate do argmax.
    pub classes: BTreeSet<String>,
}

/// O tagger: função pura de (tokens, modelo carregado).
pub struct PerceptronTagger<'m> {
    model: &'m PerceptronModel,
}

impl<'m> PerceptronTagger<'m> {
    pub fn new(model: &'m PerceptronModel) -> Self {
        Self { model }
    }

    /// Atribui uma POS tag a cada token. Retorna uma sequência nova de mesmo
    /// comprimento, mesmos `text`, com `tag` preenchida.
    pub fn tag(&self, tokens: &[Token]) -> Result<Vec<Token>> {
        if self.model.classes.is_empty() {
            return Err(ProsaError::invalid_model(
                "classes",
                "o conjunto de tags do perceptron está vazio",
            ));
        }

        // Contexto preenchido nas bordas para que as features de janela
        // não precisem de casos especiais.
        let mut context: Vec<String> = Vec::with_capacity(tokens.len() + 4);
        context.push("-START2-".to_string());
        context.push("-START-".to_string());
        context.extend(tokens.iter().map(|t| normalize(&t.text)));
        context.push("-END-".to_string());
        context.push("-END2-".to_string());

        let mut prev = "-START-".to_string();
        let mut prev2 = "-START2-".to_string();
        let mut tagged = Vec::with_capacity(tokens.len());

        for (i, tok) in tokens.iter().enumerate() {
            let w = &context[i + 2];
            let tag = match self.model.tagdict.get(w) {
                Some(t) => t.clone(),
                None => {
                    let feats = features(i, &context, &prev, &prev2);
                    self.predict(&feats)
                }
            };
            tagged.push(Token {
                text: tok.text.clone(),
                tag: tag.clone(),
                label: tok.label.clone(),
            });
            prev2 = std::mem::replace(&mut prev, tag);
        }
        Ok(tagged)
    }

    /// Argmax sobre as classes, com desempate lexicográfico: o laço percorre
    /// `classes` em ordem e só troca quando a pontuação é estritamente maior.
    fn predict(&self, feats: &[String]) -> String {
        let mut scores: HashMap<&str, f64> = HashMap::new();
        for f in feats {
            if let Some(per_class) = self.model.weights.get(f) {
                for (class, weight) in per_class {
                    *scores.entry(class.as_str()).or_insert(0.0) += weight;
                }
            }
        }

        let mut best_tag = "";
        let mut best_score = f64::NEG_INFINITY;
        for class in &self.model.classes {
            let score = scores.get(class.as_str()).copied().unwrap_or(0.0);
            if score > best_score {
                best_score = score;
                best_tag = class.as_str();
            }
        }
        best_tag.to_string()
    }
}

/// Normalização de palavras para consulta de features e `tagdict`:
/// números de 4 dígitos viram `!YEAR`, outros números viram `!DIGITS`,
/// o resto vai para minúsculas (hífens preservados).
pub fn normalize(word: &str) -> String {
    if !word.is_empty() && word.chars().all(|c| c.is_ascii_digit()) {
        if word.len() == 4 {
            "!YEAR".to_string()
        } else {
            "!DIGITS".to_string()
        }
    } else {
        word.to_lowercase()
    }
}

/// As 14 features de contexto da posição `i`. As chaves são o nome fixo da
/// feature seguido dos valores, unidos por espaço; `bias` fica sozinho.
fn features(i: usize, context: &[String], prev: &str, prev2: &str) -> Vec<String> {
    let i = i + 2; // desloca para dentro do contexto preenchido
    let w = context[i].as_str();
    let w_prev = context[i - 1].as_str();
    let w_next = context[i + 1].as_str();

    let mut feats = Vec::with_capacity(14);
    let mut add = |name: &str, parts: &[&str]| {
        let mut key = String::from(name);
        for p in parts {
            key.push(' ');
            key.push_str(p);
        }
        feats.push(key);
    };

    add("bias", &[]);
    add("i suffix", &[suffix3(w).as_str()]);
    add("i pref1", &[pref1(w).as_str()]);
    add("i-1 tag", &[prev]);
    add("i-2 tag", &[prev2]);
    add("i tag+i-2 tag", &[prev, prev2]);
    add("i word", &[w]);
    add("i-1 tag+i word", &[prev, w]);
    add("i-1 word", &[w_prev]);
    add("i-1 suffix", &[suffix3(w_prev).as_str()]);
    add("i-2 word", &[context[i - 2].as_str()]);
    add("i+1 word", &[w_next]);
    add("i+1 suffix", &[suffix3(w_next).as_str()]);
    add("i+2 word", &[context[i + 2].as_str()]);
    feats
}

/// Últimos três caracteres (em codepoints) da palavra.
fn suffix3(w: &str) -> String {
    let n = w.chars().count();
    w.chars().skip(n.saturating_sub(3)).collect()
}

/// Primeiro caractere da palavra.
fn pref1(w: &str) -> String {
    w.chars().next().map(String::from).unwrap_or_default()
}

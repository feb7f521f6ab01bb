//! # Erros do Pipeline
//!
//! Taxonomia de erros da crate. Só a carga de modelos falha de verdade:
//! durante a decodificação, features e rótulos desconhecidos valem zero e
//! texto vazio produz um documento vazio — nada disso é erro.

use thiserror::Error;

/// Alias de `Result` usado em toda a crate.
pub type Result<T> = std::result::Result<T, ProsaError>;

/// Erros que a construção de modelos e a decodificação podem produzir.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProsaError {
    /// Um arquivo de modelo obrigatório não existe (embutido ou em disco).
    #[error("ativo de modelo não encontrado: {path}")]
    AssetNotFound {
        /// Caminho (ou nome lógico `pasta/arquivo`) do ativo ausente.
        path: String,
    },

    /// O ativo existe mas não decodifica, ou decodifica para dados
    /// estruturalmente inválidos (classes vazias, índice de peso fora da
    /// tabela).
    #[error("ativo de modelo corrompido em {path}: {detail}")]
    AssetCorrupt {
        /// Caminho do ativo problemático.
        path: String,
        /// O que exatamente está errado.
        detail: String,
    },

    /// Um passo de decodificação não pode prosseguir com o modelo carregado
    /// (conjunto de classes ou rótulos vazio).
    #[error("modelo inválido ({field}): {detail}")]
    InvalidModel {
        /// Campo do modelo que inviabiliza a decodificação.
        field: &'static str,
        /// O que exatamente está errado.
        detail: String,
    },
}

impl ProsaError {
    pub(crate) fn asset_not_found(path: impl Into<String>) -> Self {
        Self::AssetNotFound { path: path.into() }
    }

    pub(crate) fn asset_corrupt(path: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::AssetCorrupt {
            path: path.into(),
            detail: detail.into(),
        }
    }

    pub(crate) fn invalid_model(field: &'static str, detail: impl Into<String>) -> Self {
        Self::InvalidModel {
            field,
            detail: detail.into(),
        }
    }
}

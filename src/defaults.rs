//! Bootstrap knowledge ingested on first run.
//!
//! When the vector store opens without a persisted collection it ingests
//! these documents through the normal upsert path, so they are embedded and
//! searchable exactly like user-added content.

use crate::domain::{DocumentDraft, DocumentKind, DocumentMeta, KnowledgeCategory};

fn knowledge(
    id: &str,
    title: &str,
    original_id: &str,
    category: KnowledgeCategory,
    content: &str,
) -> DocumentDraft {
    DocumentDraft {
        id: id.to_string(),
        kind: DocumentKind::Knowledge,
        content: content.to_string(),
        metadata: DocumentMeta {
            title: title.to_string(),
            original_id: original_id.to_string(),
            category: Some(category),
            status: None,
        },
    }
}

/// The fixed core-memory seed set: brand manifesto, technical architecture,
/// tokenomics, and brand-voice guide.
#[must_use]
pub fn core_memory() -> Vec<DocumentDraft> {
    vec![
        knowledge(
            "manifesto-core",
            "PoolPays Manifesto",
            "init-1",
            KnowledgeCategory::CoreIdentity,
            r#"
"THE HOUSE ALWAYS WINS" — MANIFESTO POOLPAYS.
Por séculos, você foi ensinado a aceitar essa verdade: A casa sempre ganha. E você sempre perde.
Em Las Vegas. Em Macau. Nos apps que prometem diversão mas entregam frustração.
Nós olhamos para esse sistema e perguntamos: POR QUE?
A PoolPays existe para APAGAR essas perguntas.
Nós removemos: O CEO (substituído por código), A burocracia (substituída por sua carteira).
VOCÊ NÃO É MAIS O JOGADOR. VOCÊ É A CASA.
"#,
        ),
        knowledge(
            "tech-architecture",
            "Technical Architecture",
            "init-2",
            KnowledgeCategory::TechDocs,
            r#"
ARQUITETURA TÉCNICA (Under the Hood).
1. Infraestrutura Arbitrum: Velocidade de milissegundos, taxas de centavos.
2. O Motor de Liquidez: O dinheiro não fica com um CEO. Fica no contrato 0x1D26... (Uniswap V3).
3. Identidade Soberana (No-KYC): Conexão via Wallet (Metamask/Trust). Sem email, sem passaporte.
Code is Law. Tudo verificável na blockchain.
"#,
        ),
        knowledge(
            "yield-mechanics",
            "Yield Mechanics",
            "init-3",
            KnowledgeCategory::TechDocs,
            r#"
ECONOMIA DO TOKEN & RENDIMENTO.
O modelo de Liquidez Compartilhada (LP).
Ciclo do Dinheiro: Aposta -> Lucro da Banca -> Retorno para a Piscina -> Saque do Investidor.
Staking Tiers:
- Day Trader: 1 Dia = 0.5%
- House Owner: 20 Dias = 18%
House Edge: A vantagem matemática (3-4%) garante o lucro do protocolo a longo prazo.
"#,
        ),
        knowledge(
            "brand-voice",
            "Brand Voice Guide",
            "init-4",
            KnowledgeCategory::CoreIdentity,
            r#"
TOM DE VOZ DA MARCA.
Valores Nucleares:
- TRUSTLESS: "Não confie em nós. Confie no código."
- PERMISSIONLESS: "Sua carteira = Seu passaporte"
- FAIR: Matemática, não manipulação.
Palavras Proibidas: Aposta, Sorte, Cassino Online.
Palavras Permitidas: Protocolo, Liquidez, Yield, Gaming Descentralizado.
"#,
        ),
    ]
}

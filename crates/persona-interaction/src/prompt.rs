//! Prompt templates for persona generation.
//!
//! Every questionnaire answer is interpolated verbatim; the templates are
//! plain text, so no escaping is applied.

use minijinja::{Environment, context};
use persona_core::FormData;

const SYSTEM_TEMPLATE_NAME: &str = "system_instruction.txt";
const USER_TEMPLATE_NAME: &str = "persona_request.txt";

const SYSTEM_INSTRUCTION: &str = r#"Você é um Arquiteto de Personas e Estrategista de Marketing Sênior.
Seu trabalho é construir um perfil psicológico e comportamental profundo, que sirva de base para estratégias de Vendas e de Marketing de Conteúdo, e não apenas preencher campos.

Siga esta lógica de inferência de marketing:
1. Cargo e Tamanho da Empresa: deduza o poder de compra (orçamento) e o nível de autoridade na decisão.
2. Meta da Empresa vs Meta Pessoal: separe o que a empresa cobra (KPIs, lucro) do que a pessoa quer para a própria carreira (promoção, reconhecimento, menos stress).
3. Nível de Conhecimento: ajuste a sofisticação da linguagem ao estágio do funil (topo, meio ou fundo).
4. Metas e Dores: trate-as como gatilhos emocionais; cada dor vira uma necessidade de alívio na copy.
5. Processo de Decisão (ROI): defina como a solução deve ser vendida de forma racional.

Escreva em Português do Brasil (pt-BR). Seja específico e evite generalidades como "querer crescer". Use termos reais da indústria informada."#;

const PERSONA_REQUEST: &str = r#"Gere um Mapa de Persona Acionável a partir das respostas estratégicas abaixo.

=== SOLUÇÃO OFERECIDA ===
Produto/Serviço: {{ data.productDescription }}

=== ETAPA 1: DEMOGRAFIA & EMPRESA (Poder & Autoridade) ===
- Cargo: {{ data.role }}
- Indústria: {{ data.industry }}
- Tamanho da Empresa: {{ data.companySize }}
- Nível de Conhecimento sobre a solução: {{ data.knowledgeLevel }} (define a complexidade do conteúdo ideal)

=== ETAPA 2: METAS & MOTIVAÇÕES (Motor da Decisão) ===
- Meta de Negócio (o que a empresa cobra / KPIs): {{ data.businessGoal }}
- Meta Pessoal / Carreira (o que a pessoa ganha): {{ data.careerGoal }}
- Maior Obstáculo / Dor: {{ data.biggestChallenge }}
- Frustrações do Dia a Dia: {{ data.dailyFrustrations }}

=== ETAPA 3: CONSUMO & INFLUÊNCIA (Onde Investir Esforços) ===
- Canais de Informação: {{ channels }}
- Tópicos / Influenciadores que acompanha: {{ data.influencersOrTopics }}

=== ETAPA 4: PROCESSO DE DECISÃO (Quebra de Barreiras) ===
- Objeções de Compra (o que impede o "sim"): {{ data.mainObjections }}
- Definição de Sucesso / ROI (como mede valor): {{ data.successMetrics }}

=== FORMATO DE SAÍDA ===
Responda com um objeto JSON com os campos do schema.
- Em 'goals', misture objetivos da empresa e pessoais, deixando claro pelo contexto qual é qual.
- Em 'solutionMapping', construa a ponte lógica entre a dor do cliente e a solução descrita.
- Em 'quote', escreva algo que essa pessoa diria num momento de frustração ou desejo intenso, com a linguagem da indústria dela.
- Em 'commonObjections', reescreva as objeções informadas como dúvidas reais de um comprador."#;

/// System instruction plus user prompt for one generation call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedPrompt {
    pub system_instruction: String,
    pub user_prompt: String,
}

/// Renders the fixed prompt templates from questionnaire answers.
pub struct PromptBuilder {
    env: Environment<'static>,
}

impl PromptBuilder {
    pub fn new() -> Result<Self, minijinja::Error> {
        let mut env = Environment::new();
        env.add_template(SYSTEM_TEMPLATE_NAME, SYSTEM_INSTRUCTION)?;
        env.add_template(USER_TEMPLATE_NAME, PERSONA_REQUEST)?;
        Ok(Self { env })
    }

    pub fn render(&self, data: &FormData) -> Result<RenderedPrompt, minijinja::Error> {
        let system_instruction = self.env.get_template(SYSTEM_TEMPLATE_NAME)?.render(())?;
        let user_prompt = self.env.get_template(USER_TEMPLATE_NAME)?.render(context! {
            data => data,
            channels => data.joined_channels(),
        })?;

        Ok(RenderedPrompt {
            system_instruction,
            user_prompt,
        })
    }
}

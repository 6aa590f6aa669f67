//! Agent-facing texts

pub const TRANSCRIPT_IDLE: &str = "Transcrição em tempo real aparecerá aqui...";
pub const TRANSCRIPT_AWAITING_SPEECH: &str = "Aguardando fala...";

pub const FLOW_NO_CLIENT: &str = "Selecione um cliente para iniciar";
pub const FLOW_CLIENT_SELECTED: &str = "Cliente selecionado - Pronto para iniciar ligação";
pub const FLOW_AWAITING_SPEECH: &str = "Ligação ativa - Aguardando fala";
pub const FLOW_CALL_ENDED: &str = "Ligação encerrada";

pub const NOTICE_CALL_STARTED: &str = "Ligação iniciada! Comece a falar...";
pub const NOTICE_CALL_ENDED: &str = "Ligação encerrada";

pub const ERR_NO_CLIENT: &str = "Selecione um cliente antes de iniciar a ligação";
pub const ERR_CALL_ACTIVE: &str = "Já existe uma ligação em andamento";

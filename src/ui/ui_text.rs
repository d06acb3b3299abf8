/// Every user-visible string, in one place.
pub struct UiText {
    pub app_title: &'static str,
    pub page_title: &'static str,
    pub page_description: &'static str,

    // Side panel
    pub sidebar_heading: &'static str,
    pub selector_label: &'static str,
    pub select_all: &'static str,
    pub clear_selection: &'static str,
    pub reload_button: &'static str,
    pub show_interval: &'static str,
    pub show_forecast_start: &'static str,

    // Historical chart
    pub history_subheader: &'static str,
    pub history_x_axis: &'static str,
    pub history_y_axis: &'static str,
    pub empty_selection_hint: &'static str,

    // Forecast chart
    pub forecast_subheader: &'static str,
    pub forecast_title: &'static str,
    pub forecast_x_axis: &'static str,
    pub forecast_y_axis: &'static str,
    pub series_history: &'static str,
    pub series_prediction: &'static str,
    pub series_interval: &'static str,
    pub series_forecast_start: &'static str,
    pub forecast_error_heading: &'static str,

    // Raw table
    pub table_expander: &'static str,
    pub table_date_column: &'static str,

    // Body states
    pub load_error_heading: &'static str,
    pub load_error_hint: &'static str,
    pub loading: &'static str,

    // Status bar
    pub status_file: &'static str,
    pub status_rows: &'static str,
    pub status_range: &'static str,
    pub status_last_run: &'static str,
}

pub const UI_TEXT: UiText = UiText {
    app_title: "Indicadores Econômicos",
    page_title: "📈 Indicadores Econômicos",
    page_description: "Este painel interativo apresenta dados históricos e projeções econômicas com base em informações do Banco Central do Brasil.",

    sidebar_heading: "Configurações de Visualização",
    selector_label: "Selecione os indicadores para exibição:",
    select_all: "Selecionar todos",
    clear_selection: "Limpar",
    reload_button: "🔄 Recarregar",
    show_interval: "Mostrar intervalo de incerteza",
    show_forecast_start: "Marcar início da previsão",

    history_subheader: "📊 Evolução Histórica dos Indicadores",
    history_x_axis: "Data",
    history_y_axis: "Valores Ajustados",
    empty_selection_hint: "Nenhum indicador selecionado.",

    forecast_subheader: "Previsão do Salário Mínimo (Modelo: Prophet-style additive)",
    forecast_title: "Projeção do Salário Mínimo para os Próximos 3 Anos",
    forecast_x_axis: "Data",
    forecast_y_axis: "Salário Mínimo (R$)",
    series_history: "Histórico",
    series_prediction: "Previsão",
    series_interval: "Intervalo 80%",
    series_forecast_start: "Início da previsão",
    forecast_error_heading: "⚠ Não foi possível gerar a previsão",

    table_expander: "📄 Ver tabela de dados",
    table_date_column: "Data",

    load_error_heading: "⚠ Não foi possível carregar os dados",
    load_error_hint: "Verifique o arquivo e clique em Recarregar.",
    loading: "Carregando dados...",

    status_file: "📁",
    status_rows: "linhas",
    status_range: "📅",
    status_last_run: "⏱",
};

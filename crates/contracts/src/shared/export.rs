/// Универсальный модуль для экспорта данных в CSV
use thiserror::Error;

/// Ошибки формирования CSV
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("CSV write error: {0}")]
    Csv(#[from] csv::Error),

    #[error("CSV buffer error: {0}")]
    Buffer(String),

    #[error("CSV output is not valid UTF-8: {0}")]
    Encoding(#[from] std::string::FromUtf8Error),
}

/// Trait для типов, которые могут быть экспортированы в CSV
pub trait CsvExportable {
    /// Возвращает массив заголовков колонок
    fn headers() -> Vec<&'static str>;

    /// Преобразует объект в массив значений строки
    fn to_csv_row(&self) -> Vec<String>;
}

/// Формирует CSV: каждое поле в двойных кавычках, кавычки внутри удваиваются,
/// строки разделены `\n` без завершающего перевода строки.
/// Заголовок присутствует всегда, даже для пустого набора.
pub fn export_to_csv<T: CsvExportable>(data: &[T]) -> Result<String, ExportError> {
    let mut writer = csv::WriterBuilder::new()
        .quote_style(csv::QuoteStyle::Always)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    writer.write_record(T::headers())?;
    for item in data {
        writer.write_record(item.to_csv_row())?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| ExportError::Buffer(e.to_string()))?;
    let mut content = String::from_utf8(bytes)?;

    if content.ends_with('\n') {
        content.pop();
    }

    Ok(content)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Row(&'static str, &'static str);

    impl CsvExportable for Row {
        fn headers() -> Vec<&'static str> {
            vec!["a", "b"]
        }

        fn to_csv_row(&self) -> Vec<String> {
            vec![self.0.to_string(), self.1.to_string()]
        }
    }

    #[test]
    fn test_quotes_every_field_and_doubles_quotes() {
        let csv = export_to_csv(&[Row("say \"hi\"", "x,y")]).unwrap();
        assert_eq!(csv, "\"a\",\"b\"\n\"say \"\"hi\"\"\",\"x,y\"");
    }

    #[test]
    fn test_empty_data_keeps_header() {
        let csv = export_to_csv::<Row>(&[]).unwrap();
        assert_eq!(csv, "\"a\",\"b\"");
    }
}

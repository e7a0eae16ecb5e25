/////////////////////////////TESTS////////////////////////////////////////////////////
/*
tests:
single line parsers
whole document with comments
decimal commas
malformed documents
*/

#[cfg(test)]
mod tests1 {
    use crate::Utils::task_parser::{
        Line, Value, parse_document, parse_key, parse_key_value_pair,
        parse_line, parse_number, parse_number_row, parse_numbers, parse_title, parse_value,
        parse_value_list,
    };

    #[test]
    fn test_parse_title() {
        let (remaining, title) = parse_title("solver_settings").unwrap();
        assert_eq!(title, "solver_settings");
        assert_eq!(remaining, "");

        let (remaining, title) = parse_title("title123 rest").unwrap();
        assert_eq!(title, "title123");
        assert_eq!(remaining, " rest");
    }

    #[test]
    fn test_parse_key() {
        let (remaining, key) = parse_key("epsilon: 1e-6").unwrap();
        assert_eq!(key, "epsilon");
        assert_eq!(remaining, ": 1e-6");

        let (remaining, key) = parse_key("save_to_csv: true").unwrap();
        assert_eq!(key, "save_to_csv");
        assert_eq!(remaining, ": true");
    }

    #[test]
    fn test_parse_value() {
        let (remaining, value) = parse_value("123 next").unwrap();
        assert_eq!(value, Value::Integer(123));
        assert_eq!(remaining, " next");

        let (_, value) = parse_value("1e-6").unwrap();
        assert_eq!(value, Value::Float(1e-6));

        let (_, value) = parse_value("0,001").unwrap();
        assert_eq!(value, Value::Float(0.001));

        let (_, value) = parse_value("true").unwrap();
        assert_eq!(value, Value::Boolean(true));

        let (_, value) = parse_value("info").unwrap();
        assert_eq!(value, Value::String("info".to_string()));
    }

    #[test]
    fn test_parse_value_list() {
        let (remaining, values) = parse_value_list("result 12 false").unwrap();
        assert_eq!(
            values,
            vec![
                Value::String("result".to_string()),
                Value::Integer(12),
                Value::Boolean(false)
            ]
        );
        assert_eq!(remaining, "");

        let (_, values) = parse_value_list("").unwrap();
        assert_eq!(values, Vec::<Value>::new());
    }

    #[test]
    fn test_parse_key_value_pair() {
        let (remaining, (key, values)) = parse_key_value_pair("epsilon : 0,5").unwrap();
        assert_eq!(key, "epsilon");
        assert_eq!(values, vec![Value::Float(0.5)]);
        assert_eq!(remaining, "");

        let (_, (key, values)) = parse_key_value_pair("filename:").unwrap();
        assert_eq!(key, "filename");
        assert!(values.is_empty());
    }

    #[test]
    fn test_parse_number() {
        assert_eq!(parse_number("2,5"), Ok(2.5));
        assert_eq!(parse_number(" -3.25 "), Ok(-3.25));
        assert_eq!(parse_number("1e3"), Ok(1000.0));
        assert!(parse_number("abc").is_err());
        assert!(parse_number("1,2,3").is_err());
        assert!(parse_number("nan").is_err());
        assert!(parse_number("inf").is_err());
        assert!(parse_number("-infinity").is_err());
    }

    #[test]
    fn test_words_are_not_floats() {
        for word in ["nan", "NaN", "inf", "infinity", "+inf"] {
            let (_, value) = parse_value(word).unwrap();
            assert_eq!(value, Value::String(word.to_string()));
            assert_eq!(value.as_string(), Some(&word.to_string()));
            assert_eq!(value.as_float(), None);
        }
        let doc = parse_document("postprocessing\nfilename: nan\n").unwrap();
        assert_eq!(
            doc["postprocessing"].first("filename"),
            Some(&Value::String("nan".to_string()))
        );
    }

    #[test]
    fn test_parse_numbers() {
        assert_eq!(parse_numbers("  4 1,5 9 "), Ok(vec![4.0, 1.5, 9.0]));
        assert!(parse_numbers("4 1 x").is_err());
        assert!(parse_numbers("").is_err());
    }

    #[test]
    fn test_parse_number_row() {
        let (remaining, row) = parse_number_row("4 1 9").unwrap();
        assert_eq!(row, vec![4.0, 1.0, 9.0]);
        assert_eq!(remaining, "");

        let (_, row) = parse_number_row("-1,5\t2e-1  +3").unwrap();
        assert_eq!(row, vec![-1.5, 0.2, 3.0]);
    }

    #[test]
    fn test_parse_line() {
        assert_eq!(
            parse_line("  matrix  ").unwrap().1,
            Line::Title("matrix".to_string())
        );
        assert_eq!(
            parse_line("loglevel: warn").unwrap().1,
            Line::Pair("loglevel".to_string(), vec![Value::String("warn".to_string())])
        );
        assert_eq!(parse_line("1 2 3").unwrap().1, Line::Numbers(vec![1.0, 2.0, 3.0]));
        // a title starting with 'e' is not a number
        assert_eq!(
            parse_line("extra").unwrap().1,
            Line::Title("extra".to_string())
        );
        assert!(parse_line("matrix extra words").is_err());
        assert!(parse_line("1 2 x").is_err());
    }

    #[test]
    fn test_parse_document() {
        let input = r#"
            # system 4x + y = 9, x + 3y = 7
            solver_settings
            epsilon: 1e-6
            loglevel: info

            // the matrix itself
            matrix
            4 1 9
            1 3 7
            postprocessing
            save_to_csv: true
            filename: result
        "#;
        let doc = parse_document(input).unwrap();
        assert_eq!(doc.len(), 3);
        let settings = &doc["solver_settings"];
        assert_eq!(settings.first("epsilon"), Some(&Value::Float(1e-6)));
        assert_eq!(
            settings.get("loglevel"),
            Some(&vec![Value::String("info".to_string())])
        );
        assert!(settings.rows.is_empty());
        assert_eq!(doc["matrix"].rows, vec![vec![4.0, 1.0, 9.0], vec![1.0, 3.0, 7.0]]);
        assert_eq!(
            doc["postprocessing"].first("save_to_csv"),
            Some(&Value::Boolean(true))
        );
    }

    #[test]
    fn test_decimal_commas() {
        let input = "matrix\n4,5 1 9,25\n1 3,5 7\n";
        let doc = parse_document(input).unwrap();
        assert_eq!(doc["matrix"].rows, vec![vec![4.5, 1.0, 9.25], vec![1.0, 3.5, 7.0]]);
    }

    #[test]
    fn test_malformed_documents() {
        assert!(parse_document("").is_err());
        assert!(parse_document("# only a comment").is_err());
        // pair before any title
        assert!(parse_document("epsilon: 1e-6\nmatrix\n1 2").is_err());
        // numbers before any title
        assert!(parse_document("1 2 3").is_err());
        let err = parse_document("matrix\n1 2 three").unwrap_err();
        assert!(err.contains("line 2"));
    }
}

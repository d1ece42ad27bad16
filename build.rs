use std::path::Path;

fn main() {
    let matrix_path = Path::new("matrices/blosum62.txt");
    validate_matrix_file(matrix_path);
    set_build_dependencies();
}

fn validate_matrix_file(matrix_path: &Path) {
    // Ensure matrix exists at build time
    assert!(
        matrix_path.exists(),
        "\n\nMATRIX BUILD ERROR: File not found\n\
         Path: {}\n\
         Please create the matrix file before building.\n",
        matrix_path.display()
    );

    let contents = std::fs::read_to_string(matrix_path).unwrap_or_else(|e| {
        panic!(
            "\n\nMATRIX BUILD ERROR: Failed to read file\n\
             Path: {}\n\
             Error: {e}\n",
            matrix_path.display()
        );
    });

    let mut lines = contents
        .lines()
        .map(str::trim)
        .enumerate()
        .filter(|(_, line)| !line.is_empty() && !line.starts_with('#'));

    let alphabet = validate_alphabet_line(lines.next());
    let mut rows = 0;
    for (i, line) in lines {
        validate_row(line, i + 1, &alphabet);
        rows += 1;
    }

    assert!(
        rows == alphabet.len(),
        "\n\nMATRIX BUILD ERROR: Expected {} rows, found {rows}\n\
         Every alphabet symbol needs its own row.\n",
        alphabet.len()
    );

    println!(
        "cargo:warning=Validated matrix: {} symbols, {} scores",
        alphabet.len(),
        rows * alphabet.len()
    );
}

fn validate_alphabet_line(line: Option<(usize, &str)>) -> Vec<char> {
    let Some((i, line)) = line else {
        panic!("\n\nMATRIX BUILD ERROR: Matrix file has no content\n");
    };

    let rest = line.strip_prefix('$').unwrap_or_else(|| {
        panic!(
            "\n\nMATRIX BUILD ERROR: Line {} must be the '$' alphabet line\n\
             Got: {line}\n",
            i + 1
        );
    });

    let alphabet: Vec<char> = rest
        .split_whitespace()
        .filter_map(|token| token.chars().next())
        .collect();

    assert!(
        alphabet.contains(&'*'),
        "\n\nMATRIX BUILD ERROR: Alphabet is missing the '*' gap symbol\n\
         Gap penalties are read from the '*' row and column.\n"
    );

    alphabet
}

fn validate_row(line: &str, line_num: usize, alphabet: &[char]) {
    let mut chars = line.chars();
    let row = chars.next().unwrap_or_default();

    assert!(
        alphabet.contains(&row),
        "\n\nMATRIX BUILD ERROR: Line {line_num} starts with '{row}', which is not in the alphabet\n"
    );

    let values: Vec<&str> = chars.as_str().split_whitespace().collect();
    assert!(
        values.len() == alphabet.len(),
        "\n\nMATRIX BUILD ERROR: Row '{row}' (line {line_num}) has {} scores, expected {}\n",
        values.len(),
        alphabet.len()
    );

    for value in values {
        assert!(
            value.parse::<i32>().is_ok(),
            "\n\nMATRIX BUILD ERROR: Row '{row}' (line {line_num}) has non-integer score '{value}'\n"
        );
    }
}

fn set_build_dependencies() {
    // Tell cargo to rerun if the matrix changes
    println!("cargo:rerun-if-changed=matrices/blosum62.txt");

    // Tell cargo to rerun if build.rs changes
    println!("cargo:rerun-if-changed=build.rs");
}

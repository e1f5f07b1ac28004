/// Split a user-supplied argument string the way a shell would, minus
/// escapes and expansion.
///
/// Whitespace separates arguments. Single or double quotes group text and
/// are removed; quoted and unquoted text that touch form one argument. An
/// unterminated quote runs to the end of the input. `""` yields an empty
/// argument.
pub fn tokenize_args(input: &str) -> Vec<String> {
    let mut args = Vec::new();
    let mut current = String::new();
    let mut in_arg = false;
    let mut quote: Option<char> = None;

    for ch in input.chars() {
        match quote {
            Some(q) if ch == q => quote = None,
            Some(_) => current.push(ch),
            None if ch == '"' || ch == '\'' => {
                quote = Some(ch);
                in_arg = true;
            }
            None if ch.is_whitespace() => {
                if in_arg {
                    args.push(std::mem::take(&mut current));
                    in_arg = false;
                }
            }
            None => {
                current.push(ch);
                in_arg = true;
            }
        }
    }

    if in_arg {
        args.push(current);
    }
    args
}

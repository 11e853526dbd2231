fn main() -> anyhow::Result<()> {
    surveyjs_export::cli::main()
}

// Ingestion prompt templates. The extraction schema below is the contract
// the parser expects back — change them together.

pub const EXTRACTION_PROMPT: &str = r#"Extract the following information from this resume text and return it as a JSON object:

Resume Text:
{resume_text}

Please extract and structure the data as follows:
{
  "name": "Full Name",
  "title": "Professional Title/Position",
  "email": "email@example.com",
  "phone": "+1 (555) 123-4567",
  "summary": "Professional summary or objective",
  "yearsExperience": "5+ years",
  "skills": [
    {"name": "JavaScript", "level": "Expert"},
    {"name": "React", "level": "Advanced"}
  ],
  "projects": [
    {
      "title": "Project Name",
      "description": "Brief description",
      "technologies": ["React", "Node.js"]
    }
  ],
  "currentWork": {
    "company": "Company Name",
    "position": "Position Title",
    "duration": "Jan 2022 - Present",
    "achievements": ["Achievement 1", "Achievement 2"],
    "responsibilities": ["Responsibility 1", "Responsibility 2"]
  },
  "achievements": [
    {"title": "Award/Achievement", "description": "Description", "year": "2023"}
  ]
}

Return ONLY the JSON object without any markdown formatting or additional text."#;

pub const SUMMARIZE_PROMPT: &str = r#"Summarize the following section of a resume. Preserve every name, position, company, skill, achievement, date, and quantifiable result exactly as written. Omit filler and formatting noise.

Section:
{chunk}

Return only the summary text."#;

pub fn extraction_prompt(resume_text: &str) -> String {
    EXTRACTION_PROMPT.replace("{resume_text}", resume_text)
}

pub fn summarize_prompt(chunk: &str) -> String {
    SUMMARIZE_PROMPT.replace("{chunk}", chunk)
}

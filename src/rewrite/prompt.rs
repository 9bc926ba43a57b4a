// Instruction prompt for the formal-register rewrite
//
// The rules target the sentence style of Korean school records (생활기록부):
// noun-ending sentences, the student's name left out where possible, concrete
// observed behaviour, and nothing but the rewritten text in the output.

const PROMPT_TEMPLATE: &str = "당신은 대한민국 고등학교 교사입니다. 다음의 학생 활동 메모를 학교생활기록부(생기부) 기재 요령에 맞게 전문적인 문체로 다듬어주세요.

문체 가이드:
- '~함', '~임', '~함.' 형태의 명조체 종결 어미를 사용하세요.
- 주어(학생 이름)는 문맥상 필요한 경우에만 최소한으로 사용하고 가급적 생략하세요.
- 구체적인 행동과 변화, 성취 위주로 기술하세요.
- 결과물만 출력하고 부연 설명은 하지 마세요.

메모: ";

/// Sampling temperature: low, so rewrites stay literal.
pub const TEMPERATURE: f32 = 0.1;

pub const TOP_P: f32 = 0.95;

/// Build the full prompt with the raw note appended verbatim.
pub fn build_prompt(raw: &str) -> String {
    let mut prompt = String::with_capacity(PROMPT_TEMPLATE.len() + raw.len());
    prompt.push_str(PROMPT_TEMPLATE);
    prompt.push_str(raw);
    prompt
}

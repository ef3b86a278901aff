use axum::{response::Html, routing::get, Router};

pub fn router() -> Router {
    Router::new().route("/", get(index))
}

async fn index() -> Html<&'static str> {
    Html(r#"<!doctype html>
<html lang="en">
<head>
  <meta charset="utf-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1" />
  <title>FitMind - Gym &amp; Nutrition Planner</title>
  <script src="https://cdn.jsdelivr.net/npm/marked/marked.min.js"></script>
  <style>
    body { font-family: Arial, sans-serif; margin: 2rem; color: #1d1d1f; max-width: 960px; }
    h1 { margin-bottom: 0.5rem; }
    .card { border: 1px solid #ddd; padding: 1rem; border-radius: 8px; margin-bottom: 1rem; }
    .grid { display: grid; grid-template-columns: 1fr 1fr; gap: 0 1rem; }
    label { display: block; margin-top: 0.75rem; font-weight: 600; }
    input, select, textarea { width: 100%; padding: 0.5rem; box-sizing: border-box; }
    button { margin-top: 1rem; padding: 0.6rem 1rem; }
    table { border-collapse: collapse; margin: 0.5rem 0; }
    th, td { border: 1px solid #ccc; padding: 0.3rem 0.5rem; }
    .error { color: #b00020; }
    #bmi { font-weight: 600; }
  </style>
</head>
<body>
  <h1>FitMind</h1>
  <p>Personalized gym and nutrition plans from a team of AI agents.</p>

  <form id="profileForm" class="card">
    <div class="grid">
      <div>
        <label>Name</label>
        <input name="name" required />
        <label>Age</label>
        <input name="age" type="number" min="1" max="120" value="25" required />
        <label>Gender</label>
        <select name="gender"><option>Male</option><option>Female</option><option>Other</option></select>
        <label>Weight (kg)</label>
        <input name="weight" type="number" step="0.1" value="70" required />
        <label>Height (cm)</label>
        <input name="height" type="number" step="0.1" value="170" required />
      </div>
      <div>
        <label>Fitness goal</label>
        <select name="goal">
          <option>Build Muscle</option><option>Lose Fat</option>
          <option>Improve Endurance</option><option>General Fitness</option>
        </select>
        <label>Experience level</label>
        <select name="experience"><option>Beginner</option><option>Intermediate</option><option>Advanced</option></select>
        <label>Preferred workout time</label>
        <select name="workout_time"><option>Morning</option><option>Afternoon</option><option>Evening</option></select>
        <label>Diet preference</label>
        <select name="diet_preference">
          <option>Omnivore</option><option>Vegetarian</option><option>Vegan</option>
          <option>Keto</option><option>Paleo</option>
        </select>
        <label>Allergies</label>
        <input name="allergies" placeholder="None" />
        <label>Health conditions</label>
        <input name="health_conditions" placeholder="None" />
      </div>
    </div>
    <button id="submitBtn" type="submit">Generate my plan</button>
  </form>

  <div class="card">
    <div id="bmi"></div>
    <div id="output"></div>
  </div>

  <script>
    const form = document.getElementById('profileForm');
    const output = document.getElementById('output');
    const bmi = document.getElementById('bmi');
    const submitBtn = document.getElementById('submitBtn');

    form.addEventListener('submit', async (event) => {
      event.preventDefault();
      const data = Object.fromEntries(new FormData(form).entries());
      data.age = parseInt(data.age, 10);
      data.allergies = data.allergies.trim() || 'None';
      data.health_conditions = data.health_conditions.trim() || 'None';

      submitBtn.disabled = true;
      bmi.textContent = '';
      output.className = '';
      output.textContent = 'Generating your plan, this can take a minute...';
      try {
        const res = await fetch('/generate_plan', {
          method: 'POST',
          headers: { 'Content-Type': 'application/json' },
          body: JSON.stringify(data)
        });
        const json = await res.json();
        if (!res.ok) {
          output.className = 'error';
          output.textContent = json.error || 'Request failed';
          return;
        }
        bmi.textContent = `BMI: ${json.bmi} (${json.bmi_category})`;
        if (window.marked) {
          output.innerHTML = marked.parse(json.plan);
        } else {
          output.textContent = json.plan;
        }
      } catch (err) {
        output.className = 'error';
        output.textContent = String(err);
      } finally {
        submitBtn.disabled = false;
      }
    });
  </script>
</body>
</html>"#)
}
